//! Topics: catalog entries, question/answer content and where it comes from.

pub mod model;
pub mod sample;
pub mod source;

pub use model::{QaItem, TopicDescriptor, TopicDocument, TopicId};
pub use sample::{sample_catalog, sample_items};
pub use source::TopicSource;
