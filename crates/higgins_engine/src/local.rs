use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use higgins_logging::{higgins_debug, higgins_info};
use higgins_script::{handle, FunctionEvent, HandlerOutcome, Session};

use crate::{decode_envelope, FailureKind, InvokeError, InvokeRequest, Invoker};

/// Runs the conversation script in-process behind the same wire format as
/// a remote function.
pub struct LocalInvoker {
    session: Mutex<Session>,
    /// Script delegate name to function name.
    delegates: HashMap<String, String>,
    delegate_invoker: Option<Arc<dyn Invoker>>,
}

impl LocalInvoker {
    pub fn new(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
            delegates: HashMap::new(),
            delegate_invoker: None,
        }
    }

    /// Routes `lambda NAME` reassemblies to `invoker`, mapping names through `delegates`.
    pub fn with_delegates(
        mut self,
        delegates: HashMap<String, String>,
        invoker: Arc<dyn Invoker>,
    ) -> Self {
        self.delegates = delegates;
        self.delegate_invoker = Some(invoker);
        self
    }

    /// Opening line of the script, if any.
    pub fn greeting(&self) -> Option<String> {
        self.session.lock().ok().and_then(|mut session| session.initial())
    }

    async fn delegate(&self, name: &str) -> Result<String, InvokeError> {
        let Some(invoker) = &self.delegate_invoker else {
            return Err(InvokeError::new(
                FailureKind::FunctionError,
                format!("no invoker configured for delegate {name:?}"),
            ));
        };
        let function_name = self
            .delegates
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string());
        higgins_info!("Delegating to {} as {}", name, function_name);
        invoker
            .invoke(&InvokeRequest::without_payload(function_name))
            .await
    }
}

#[async_trait::async_trait]
impl Invoker for LocalInvoker {
    async fn invoke(&self, request: &InvokeRequest) -> Result<String, InvokeError> {
        let event = FunctionEvent::from_json(&request.payload)
            .map_err(|err| InvokeError::new(FailureKind::InvalidPayload, err.to_string()))?;

        let outcome = {
            let mut session = self.session.lock().map_err(|_| {
                InvokeError::new(FailureKind::FunctionError, "script session poisoned")
            })?;
            handle(&mut session, &event)
        }
        .map_err(|err| InvokeError::new(FailureKind::FunctionError, err.to_string()))?;

        match outcome {
            HandlerOutcome::Respond(response) => {
                higgins_debug!("Local function answered {:?}", response);
                let bytes = serde_json::to_vec(&response)
                    .map_err(|err| InvokeError::new(FailureKind::FunctionError, err.to_string()))?;
                decode_envelope(&bytes)
            }
            HandlerOutcome::Delegate(name) => self.delegate(&name).await,
        }
    }
}
