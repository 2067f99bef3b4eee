#![deny(missing_docs)]
//! Shared logging utilities for the higgins workspace.
//!
//! This crate provides the `higgins_*` logging macros used across the codebase,
//! a per-thread request tag that is prefixed to every message, and a minimal
//! test initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Request currently being handled on this thread, 0 when none.
    static REQUEST_TAG: Cell<u64> = const { Cell::new(0) };
}

/// Tags log lines emitted on the current thread with a request id.
/// Pass 0 to clear the tag.
pub fn set_request_tag(request_id: u64) {
    REQUEST_TAG.with(|v| v.set(request_id));
}

/// Returns the request id tagged on the current thread, or 0.
pub fn request_tag() -> u64 {
    REQUEST_TAG.with(|v| v.get())
}

#[doc(hidden)]
pub fn tag_prefix() -> String {
    match request_tag() {
        0 => String::new(),
        id => format!("[req {id}] "),
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! higgins_trace {
    ($($arg:tt)*) => {{
        log::trace!("{}{}", $crate::tag_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! higgins_info {
    ($($arg:tt)*) => {{
        log::info!("{}{}", $crate::tag_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! higgins_debug {
    ($($arg:tt)*) => {{
        log::debug!("{}{}", $crate::tag_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! higgins_warn {
    ($($arg:tt)*) => {{
        log::warn!("{}{}", $crate::tag_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! higgins_error {
    ($($arg:tt)*) => {{
        log::error!("{}{}", $crate::tag_prefix(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_prefix_follows_request_tag() {
        set_request_tag(0);
        assert_eq!(tag_prefix(), "");
        set_request_tag(12);
        assert_eq!(request_tag(), 12);
        assert_eq!(tag_prefix(), "[req 12] ");
        set_request_tag(0);
    }
}
