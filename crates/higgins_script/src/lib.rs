//! Higgins script: keyword/decomposition/reassembly conversation responder.
//!
//! This is the logic behind the remote function. Scripts are plain text,
//! one `tag: content` entry per line, and may be split across a core file
//! and any number of add-on files.
mod error;
mod handler;
mod matcher;
mod script;
mod session;

pub use error::ScriptError;
pub use handler::{handle, FunctionEvent, FunctionResponse, HandlerOutcome};
pub use script::{Decomp, Key, Script, ScriptBuilder, FALLBACK_KEY};
pub use session::{Reply, Session};
