#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Backspace,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User replaced the input text.
    InputChanged(String),
    /// Key press anywhere in the front-end.
    KeyPressed(Key),
    /// A whole line typed and confirmed at once; sets the input and submits it.
    LineEntered(String),
    /// Submit with an override text instead of the input field.
    Ask(String),
    /// Remote function answered with a response body.
    ResponseReceived {
        request_id: crate::RequestId,
        body: String,
    },
    /// Remote invocation failed or the response was malformed.
    ResponseFailed {
        request_id: crate::RequestId,
        error: String,
    },
    /// The post-receipt delay for a response has elapsed.
    RenderDue {
        request_id: crate::RequestId,
        body: String,
    },
    /// UI tick to coalesce rendering.
    Tick,
}
