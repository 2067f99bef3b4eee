use higgins_core::{update, AppState, Key, Msg};

#[test]
fn tick_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::Tick);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn unmapped_keys_leave_state_untouched() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::KeyPressed(Key::Other));
    assert_eq!(state, next);
    assert!(effects.is_empty());
}
