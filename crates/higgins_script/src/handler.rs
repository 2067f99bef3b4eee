use serde::{Deserialize, Serialize};

use crate::{Reply, ScriptError, Session};

/// Function input. Accepts either `{"Payload": "..."}` or a bare JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawEvent")]
pub struct FunctionEvent {
    pub payload: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEvent {
    Wrapped {
        #[serde(rename = "Payload")]
        payload: String,
    },
    Bare(String),
}

impl From<RawEvent> for FunctionEvent {
    fn from(raw: RawEvent) -> Self {
        match raw {
            RawEvent::Wrapped { payload } | RawEvent::Bare(payload) => Self { payload },
        }
    }
}

impl FunctionEvent {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl FunctionResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
    Respond(FunctionResponse),
    /// The caller must invoke the named delegate and return its body.
    Delegate(String),
}

/// Runs one function event through the session.
///
/// A quit phrase answers with a farewell, or an empty body when the script
/// has none.
pub fn handle(session: &mut Session, event: &FunctionEvent) -> Result<HandlerOutcome, ScriptError> {
    let outcome = match session.respond(&event.payload)? {
        Reply::Say(text) => HandlerOutcome::Respond(FunctionResponse::ok(text)),
        Reply::Quit => HandlerOutcome::Respond(FunctionResponse::ok(
            session.farewell().unwrap_or_default(),
        )),
        Reply::Delegate(name) => HandlerOutcome::Delegate(name),
    };
    Ok(outcome)
}
