//! Higgins core: pure request/response state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, RENDER_DELAY};
pub use msg::{Key, Msg};
pub use state::{AppState, OutputState, RequestId};
pub use update::update;
pub use view_model::AppViewModel;
