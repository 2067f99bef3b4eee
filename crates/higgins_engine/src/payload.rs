use serde::Deserialize;

use crate::{FailureKind, InvokeError};

/// Encodes user text as the JSON string sent to the function.
pub fn encode_payload(text: &str) -> String {
    serde_json::Value::String(text.to_owned()).to_string()
}

/// Only `body` is consumed; `statusCode` and anything else is ignored.
#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    body: String,
}

/// Extracts the `body` string from a function response.
pub fn decode_envelope(bytes: &[u8]) -> Result<String, InvokeError> {
    serde_json::from_slice::<ResponseEnvelope>(bytes)
        .map(|envelope| envelope.body)
        .map_err(|err| InvokeError::new(FailureKind::MalformedResponse, err.to_string()))
}
