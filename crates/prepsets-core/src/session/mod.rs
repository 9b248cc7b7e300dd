//! Session state: selection, query, paging and marks.

pub mod model;
pub mod settings;

pub use model::{SessionAction, SessionState, TrackedKey};
pub use settings::SessionSettings;
