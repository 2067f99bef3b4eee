use crate::{AppState, Effect, Key, Msg, OutputState, RENDER_DELAY};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::KeyPressed(Key::Enter) => {
            state.begin_thinking();
            vec![submit(&mut state, None)]
        }
        Msg::LineEntered(text) => {
            state.set_input(text);
            state.begin_thinking();
            vec![submit(&mut state, None)]
        }
        Msg::KeyPressed(Key::Char(c)) => {
            state.push_input(c);
            Vec::new()
        }
        Msg::KeyPressed(Key::Backspace) => {
            state.pop_input();
            Vec::new()
        }
        Msg::Ask(text) => {
            state.begin_thinking();
            vec![submit(&mut state, Some(text))]
        }
        Msg::ResponseReceived { request_id, body } => {
            if state.settle(request_id) {
                vec![Effect::ScheduleRender {
                    request_id,
                    body,
                    delay: RENDER_DELAY,
                }]
            } else {
                // Superseded by a newer request.
                Vec::new()
            }
        }
        Msg::RenderDue { request_id, body } => {
            if state.is_latest(request_id) && state.output_state() == OutputState::Thinking {
                state.show_output(body);
                vec![Effect::FocusInput]
            } else {
                Vec::new()
            }
        }
        Msg::ResponseFailed { request_id, error } => {
            if state.settle(request_id) {
                state.show_failure(error);
                vec![Effect::FocusInput]
            } else {
                Vec::new()
            }
        }
        Msg::KeyPressed(Key::Other) | Msg::Tick => Vec::new(),
    };

    (state, effects)
}

/// Issues one remote invocation for `text_override`, or the input field when absent.
fn submit(state: &mut AppState, text_override: Option<String>) -> Effect {
    let text = text_override.unwrap_or_else(|| state.input().to_owned());
    let request_id = state.issue_request();
    Effect::Invoke { request_id, text }
}
