use std::collections::BTreeSet;

use crate::view_model::AppViewModel;

pub type RequestId = u64;

/// Indicator shown on the output element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputState {
    #[default]
    Idle,
    Thinking,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    input: String,
    output: String,
    output_state: OutputState,
    error: Option<String>,
    next_request_id: RequestId,
    latest_request: Option<RequestId>,
    outstanding: BTreeSet<RequestId>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            output_state: OutputState::Idle,
            error: None,
            next_request_id: 1,
            latest_request: None,
            outstanding: BTreeSet::new(),
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            input: self.input.clone(),
            output: self.output.clone(),
            output_state: self.output_state,
            error: self.error.clone(),
            outstanding: self.outstanding.len(),
            dirty: self.dirty,
        }
    }

    pub fn output_state(&self) -> OutputState {
        self.output_state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the dirty flag and clears it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn push_input(&mut self, c: char) {
        self.input.push(c);
        self.mark_dirty();
    }

    pub(crate) fn pop_input(&mut self) {
        if self.input.pop().is_some() {
            self.mark_dirty();
        }
    }

    /// Clears the output and switches the indicator to thinking.
    pub(crate) fn begin_thinking(&mut self) {
        self.output.clear();
        self.error = None;
        self.output_state = OutputState::Thinking;
        self.mark_dirty();
    }

    /// Issues a new request id and makes it the only one whose result may render.
    pub(crate) fn issue_request(&mut self) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.latest_request = Some(request_id);
        self.outstanding.insert(request_id);
        self.mark_dirty();
        request_id
    }

    /// Marks a request as answered. Returns true if it is still the latest.
    pub(crate) fn settle(&mut self, request_id: RequestId) -> bool {
        if self.outstanding.remove(&request_id) {
            self.mark_dirty();
        }
        self.latest_request == Some(request_id)
    }

    pub(crate) fn is_latest(&self, request_id: RequestId) -> bool {
        self.latest_request == Some(request_id)
    }

    pub(crate) fn show_output(&mut self, body: String) {
        self.output = body;
        self.input.clear();
        self.output_state = OutputState::Idle;
        self.latest_request = None;
        self.mark_dirty();
    }

    pub(crate) fn show_failure(&mut self, error: String) {
        self.error = Some(error);
        self.output_state = OutputState::Failed;
        self.latest_request = None;
        self.mark_dirty();
    }
}
