//! Linkify core: pure record state machine and view-model helpers.
mod effect;
mod msg;
mod record;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{IngestSuccess, Msg};
pub use record::{normalize_input, LinkRecord, LinkStatus, RecordId, FAILURE_TITLE};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, RecordRowView};
