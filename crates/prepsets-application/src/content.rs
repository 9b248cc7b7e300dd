//! Loading the question list of one topic.

use prepsets_core::topic::{QaItem, TopicId, TopicSource, sample_items};
use std::sync::Arc;
use std::time::Duration;

/// Fetches a topic's questions with a sample fallback and a minimum duration.
#[derive(Clone)]
pub struct ContentLoader {
    source: Arc<dyn TopicSource>,
    min_delay: Duration,
}

impl ContentLoader {
    pub fn new(source: Arc<dyn TopicSource>, min_delay: Duration) -> Self {
        Self { source, min_delay }
    }

    /// Loads the items of `id`.
    ///
    /// Resolves no sooner than `min_delay` after the call, even when the
    /// source answers immediately. A topic that fails to resolve falls back
    /// to its built-in sample list, or to an empty list.
    ///
    /// This never decides whether the result is still wanted; the caller
    /// checks that before applying it.
    pub async fn load(&self, id: TopicId) -> Vec<QaItem> {
        let (_, fetched) = tokio::join!(tokio::time::sleep(self.min_delay), self.source.fetch(id));

        match fetched {
            Ok(doc) => doc.items,
            Err(e) => {
                tracing::debug!("Topic {} did not resolve ({}), using fallback", id, e);
                sample_items(id).unwrap_or_default()
            }
        }
    }
}
