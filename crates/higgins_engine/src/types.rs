use std::fmt;

use thiserror::Error;

pub type RequestId = u64;

/// How the function is invoked. Only `RequestResponse` returns a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvocationType {
    #[default]
    RequestResponse,
    Event,
    DryRun,
}

impl InvocationType {
    pub fn header_value(self) -> &'static str {
        match self {
            InvocationType::RequestResponse => "RequestResponse",
            InvocationType::Event => "Event",
            InvocationType::DryRun => "DryRun",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeRequest {
    pub function_name: String,
    pub invocation_type: InvocationType,
    /// JSON document sent as the request body. Empty means no body.
    pub payload: String,
}

impl InvokeRequest {
    /// Synchronous call carrying `text` as a JSON string payload.
    pub fn request_response(function_name: impl Into<String>, text: &str) -> Self {
        Self {
            function_name: function_name.into(),
            invocation_type: InvocationType::RequestResponse,
            payload: crate::encode_payload(text),
        }
    }

    /// Synchronous call without a request body.
    pub fn without_payload(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            invocation_type: InvocationType::RequestResponse,
            payload: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    InvokeCompleted {
        request_id: RequestId,
        result: Result<String, InvokeError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct InvokeError {
    pub kind: FailureKind,
    pub message: String,
}

impl InvokeError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    InvalidPayload,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// The function ran and reported an error.
    FunctionError,
    MalformedResponse,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::InvalidPayload => write!(f, "invalid payload"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::FunctionError => write!(f, "function error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
