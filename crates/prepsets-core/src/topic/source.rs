//! Topic source trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::topic::model::{TopicDocument, TopicId};

/// Resolves the content resource of a topic (conventionally `set{id}.json`).
///
/// Any error (missing resource, unreadable file, invalid JSON) means the
/// topic did not resolve. Callers treat that as a normal outcome and fall
/// back to built-in data; it is never shown to the user.
#[async_trait]
pub trait TopicSource: Send + Sync {
    /// Fetches and shape-checks the document for `id`.
    async fn fetch(&self, id: TopicId) -> Result<TopicDocument>;
}
