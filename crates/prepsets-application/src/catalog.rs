//! Topic catalog discovery.

use prepsets_core::topic::{TopicDescriptor, TopicId, TopicSource, sample_catalog};
use std::sync::Arc;

/// Discovers which topics exist by probing candidate ids in order.
#[derive(Clone)]
pub struct CatalogLoader {
    source: Arc<dyn TopicSource>,
}

impl CatalogLoader {
    pub fn new(source: Arc<dyn TopicSource>) -> Self {
        Self { source }
    }

    /// Probes ids `1..=max_id` in ascending order.
    ///
    /// Ids that fail to resolve are skipped. A resolved topic is named by its
    /// `setName`, or `"Set {id}"` without one. When nothing resolves the
    /// built-in sample catalog is returned, so the list is never empty.
    pub async fn discover(&self, max_id: u32) -> Vec<TopicDescriptor> {
        let mut detected = Vec::new();

        for id in (1..=max_id).map(TopicId) {
            match self.source.fetch(id).await {
                Ok(doc) => {
                    let name = doc.set_name.unwrap_or_else(|| format!("Set {}", id));
                    detected.push(TopicDescriptor { id, name });
                }
                Err(e) => {
                    tracing::debug!("Topic {} not available: {}", id, e);
                }
            }
        }

        if detected.is_empty() {
            tracing::info!("No topic sets found, using sample catalog");
            return sample_catalog();
        }

        tracing::info!("Discovered {} topic set(s)", detected.len());
        detected
    }
}
