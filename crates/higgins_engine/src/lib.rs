//! Higgins engine: remote function invocation and effect execution.
mod engine;
mod invoke;
mod local;
mod payload;
mod types;

pub use engine::EngineHandle;
pub use invoke::{HttpInvoker, InvokeSettings, Invoker, API_VERSION};
pub use local::LocalInvoker;
pub use payload::{decode_envelope, encode_payload};
pub use types::{EngineEvent, FailureKind, InvocationType, InvokeError, InvokeRequest, RequestId};
