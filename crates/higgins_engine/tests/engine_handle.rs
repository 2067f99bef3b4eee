use std::sync::{Arc, Mutex};
use std::time::Duration;

use higgins_engine::{
    EngineEvent, EngineHandle, FailureKind, InvokeError, InvokeRequest, Invoker,
};

/// Echoes the payload back, or fails for the text "fail".
#[derive(Default)]
struct EchoInvoker {
    seen: Mutex<Vec<InvokeRequest>>,
}

#[async_trait::async_trait]
impl Invoker for EchoInvoker {
    async fn invoke(&self, request: &InvokeRequest) -> Result<String, InvokeError> {
        self.seen.lock().unwrap().push(request.clone());
        if request.payload == "\"fail\"" {
            return Err(InvokeError {
                kind: FailureKind::Network,
                message: "connection refused".to_string(),
            });
        }
        Ok(format!("echo {}", request.payload))
    }
}

fn collect(engine: &EngineHandle, count: usize) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    while events.len() < count {
        match engine.recv_timeout(Duration::from_secs(5)) {
            Some(event) => events.push(event),
            None => panic!("timed out waiting for engine events"),
        }
    }
    events.sort_by_key(|EngineEvent::InvokeCompleted { request_id, .. }| *request_id);
    events
}

#[test]
fn each_invoke_produces_one_completion() {
    let invoker = Arc::new(EchoInvoker::default());
    let engine = EngineHandle::new(invoker.clone(), "HigginsV2").unwrap();

    engine.invoke(1, "hello");
    engine.invoke(2, "fail");

    let events = collect(&engine, 2);
    assert_eq!(
        events[0],
        EngineEvent::InvokeCompleted {
            request_id: 1,
            result: Ok("echo \"hello\"".to_string()),
        }
    );
    match &events[1] {
        EngineEvent::InvokeCompleted {
            request_id: 2,
            result: Err(err),
        } => assert_eq!(err.kind, FailureKind::Network),
        other => panic!("unexpected event {other:?}"),
    }

    let seen = invoker.seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|request| request.function_name == "HigginsV2"));
    assert!(engine.try_recv().is_none());
}
