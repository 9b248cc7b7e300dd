//! Domain model of prepsets: topics, question filtering and paging,
//! star/review marks, and the session state that ties them together.

pub mod annotation;
pub mod clipboard;
pub mod error;
pub mod pagination;
pub mod query;
pub mod question_id;
pub mod session;
pub mod shortcut;
pub mod storage;
pub mod topic;

// Re-export common error type
pub use error::{PrepError, Result};

pub use annotation::Annotations;
pub use question_id::QuestionId;
pub use session::{SessionAction, SessionSettings, SessionState, TrackedKey};
pub use topic::{QaItem, TopicDescriptor, TopicDocument, TopicId};
