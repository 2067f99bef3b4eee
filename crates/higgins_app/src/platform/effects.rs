use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use higgins_core::{Effect, Msg};
use higgins_engine::{EngineEvent, EngineHandle};
use higgins_logging::{higgins_debug, higgins_info, higgins_warn, set_request_tag};

const EVENT_POLL: Duration = Duration::from_millis(50);

/// Executes core effects and feeds their results back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self { engine, msg_tx };
        runner.spawn_event_loop();
        runner
    }

    /// Runs IO effects and returns the ones the console has to handle.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut ui_effects = Vec::new();
        for effect in effects {
            match effect {
                Effect::Invoke { request_id, text } => {
                    set_request_tag(request_id);
                    higgins_info!("Invoke text_len={}", text.len());
                    set_request_tag(0);
                    self.engine.invoke(request_id, text);
                }
                Effect::ScheduleRender {
                    request_id,
                    body,
                    delay,
                } => {
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(delay);
                        let _ = msg_tx.send(Msg::RenderDue { request_id, body });
                    });
                }
                Effect::FocusInput => ui_effects.push(Effect::FocusInput),
            }
        }
        ui_effects
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(EVENT_POLL) else {
                continue;
            };
            let msg = match event {
                EngineEvent::InvokeCompleted { request_id, result } => {
                    set_request_tag(request_id);
                    let msg = match result {
                        Ok(body) => {
                            higgins_debug!("Response body_len={}", body.len());
                            Msg::ResponseReceived { request_id, body }
                        }
                        Err(err) => {
                            higgins_warn!("Invocation failed: {}", err);
                            Msg::ResponseFailed {
                                request_id,
                                error: err.to_string(),
                            }
                        }
                    };
                    set_request_tag(0);
                    msg
                }
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        });
    }
}
