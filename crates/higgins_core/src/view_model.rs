use crate::OutputState;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub output: String,
    pub output_state: OutputState,
    /// Last invocation failure, shown while `output_state` is `Failed`.
    pub error: Option<String>,
    /// Requests sent whose response has not arrived yet.
    pub outstanding: usize,
    pub dirty: bool,
}
