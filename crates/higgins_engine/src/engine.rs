use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::{EngineEvent, InvokeRequest, Invoker, RequestId};

enum EngineCommand {
    Invoke { request_id: RequestId, text: String },
}

/// Runs invocations on a background runtime. Calls are independent: there
/// is no cancellation and no retry.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(invoker: Arc<dyn Invoker>, function_name: impl Into<String>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let function_name = function_name.into();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let invoker = invoker.clone();
                let event_tx = event_tx.clone();
                let function_name = function_name.clone();
                runtime.spawn(async move {
                    handle_command(invoker.as_ref(), &function_name, command, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn invoke(&self, request_id: RequestId, text: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Invoke {
            request_id,
            text: text.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    invoker: &dyn Invoker,
    function_name: &str,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Invoke { request_id, text } => {
            let request = InvokeRequest::request_response(function_name, &text);
            let result = invoker.invoke(&request).await;
            let _ = event_tx.send(EngineEvent::InvokeCompleted { request_id, result });
        }
    }
}
