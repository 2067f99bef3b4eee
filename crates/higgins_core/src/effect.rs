use std::time::Duration;

/// Pause between receiving a response and showing it, to avoid flicker.
pub const RENDER_DELAY: Duration = Duration::from_millis(7);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Invoke the remote function with `text` as the payload.
    Invoke {
        request_id: crate::RequestId,
        text: String,
    },
    /// Deliver `Msg::RenderDue` after `delay`.
    ScheduleRender {
        request_id: crate::RequestId,
        body: String,
        delay: Duration,
    },
    /// Return the cursor to the input.
    FocusInput,
}
