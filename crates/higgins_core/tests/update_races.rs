use higgins_core::{update, AppState, Effect, Key, Msg, OutputState};

fn submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::KeyPressed(Key::Enter))
}

fn deliver(state: AppState, request_id: u64, body: &str) -> AppState {
    let (state, effects) = update(
        state,
        Msg::ResponseReceived {
            request_id,
            body: body.to_string(),
        },
    );
    let mut state = state;
    for effect in effects {
        if let Effect::ScheduleRender {
            request_id, body, ..
        } = effect
        {
            let (next, _) = update(state, Msg::RenderDue { request_id, body });
            state = next;
        }
    }
    state
}

fn two_outstanding() -> AppState {
    let (state, first) = submit(AppState::new(), "one");
    let (state, second) = submit(state, "two");
    let invokes = first
        .iter()
        .chain(second.iter())
        .filter(|effect| matches!(effect, Effect::Invoke { .. }))
        .count();
    assert_eq!(invokes, 2);
    assert_eq!(state.view().outstanding, 2);
    state
}

#[test]
fn latest_request_wins_when_answered_in_order() {
    let state = two_outstanding();
    let state = deliver(state, 1, "first");
    assert_eq!(state.view().output_state, OutputState::Thinking);
    let state = deliver(state, 2, "second");

    let view = state.view();
    assert_eq!(view.output, "second");
    assert_eq!(view.output_state, OutputState::Idle);
    assert_eq!(view.outstanding, 0);
}

#[test]
fn stale_response_arriving_last_is_discarded() {
    let state = two_outstanding();
    let state = deliver(state, 2, "second");
    let state = deliver(state, 1, "first");

    let view = state.view();
    assert_eq!(view.output, "second");
    assert_eq!(view.output_state, OutputState::Idle);
    assert_eq!(view.outstanding, 0);
}

#[test]
fn stale_failure_does_not_override_newer_request() {
    let state = two_outstanding();
    let (state, effects) = update(
        state,
        Msg::ResponseFailed {
            request_id: 1,
            error: "boom".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().output_state, OutputState::Thinking);
    assert_eq!(state.view().error, None);

    let state = deliver(state, 2, "ok");
    assert_eq!(state.view().output, "ok");
}

#[test]
fn pending_render_is_dropped_when_a_newer_request_starts() {
    let (state, _) = submit(AppState::new(), "one");
    let (state, _) = update(
        state,
        Msg::ResponseReceived {
            request_id: 1,
            body: "first".to_string(),
        },
    );
    let (state, _) = submit(state, "two");

    let (state, effects) = update(
        state,
        Msg::RenderDue {
            request_id: 1,
            body: "first".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().output, "");
    assert_eq!(state.view().output_state, OutputState::Thinking);
}

#[test]
fn entered_line_is_sent_after_a_render_clears_the_input() {
    let (state, _) = submit(AppState::new(), "one");
    let (state, _) = update(
        state,
        Msg::ResponseReceived {
            request_id: 1,
            body: "first".to_string(),
        },
    );

    // The render clears the input; the entered line carries its own text.
    let (state, _) = update(
        state,
        Msg::RenderDue {
            request_id: 1,
            body: "first".to_string(),
        },
    );
    assert_eq!(state.view().output, "first");
    let (state, effects) = update(state, Msg::LineEntered("two".to_string()));
    assert_eq!(
        effects,
        vec![Effect::Invoke {
            request_id: 2,
            text: "two".to_string(),
        }]
    );
    assert_eq!(state.view().output_state, OutputState::Thinking);
    assert_eq!(state.view().output, "");
}

#[test]
fn entered_line_is_sent_verbatim_even_when_empty() {
    let (_, effects) = update(AppState::new(), Msg::LineEntered(String::new()));
    assert_eq!(
        effects,
        vec![Effect::Invoke {
            request_id: 1,
            text: String::new(),
        }]
    );
}
