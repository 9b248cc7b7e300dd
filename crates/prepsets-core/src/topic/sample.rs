//! Built-in sample sets used when no topic resource resolves.

use crate::topic::model::{QaItem, TopicDescriptor, TopicId};

/// Ids that have built-in sample content.
pub const SAMPLE_TOPIC_IDS: [TopicId; 2] = [TopicId(1), TopicId(2)];

/// Sample content for `id`, if any is defined.
pub fn sample_items(id: TopicId) -> Option<Vec<QaItem>> {
    match id.get() {
        1 => Some(vec![
            QaItem::new(
                "What is closure in JavaScript?",
                "A closure is a function that remembers its outer lexical scope even when executed outside that scope.",
            ),
            QaItem::new(
                "Explain the event loop.",
                "The event loop processes the call stack and task queue to run async callbacks.",
            ),
        ]),
        2 => Some(vec![QaItem::new(
            "What is React?",
            "React is a UI library for building interfaces using declarative components.",
        )]),
        _ => None,
    }
}

/// The catalog shown when discovery finds nothing.
pub fn sample_catalog() -> Vec<TopicDescriptor> {
    SAMPLE_TOPIC_IDS
        .iter()
        .map(|id| TopicDescriptor::new(*id, format!("Set {} (sample)", id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_has_two_entries() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog,
            vec![
                TopicDescriptor::new(TopicId(1), "Set 1 (sample)"),
                TopicDescriptor::new(TopicId(2), "Set 2 (sample)"),
            ]
        );
    }

    #[test]
    fn test_every_sample_topic_has_items() {
        for id in SAMPLE_TOPIC_IDS {
            assert!(sample_items(id).is_some_and(|items| !items.is_empty()));
        }
        assert!(sample_items(TopicId(3)).is_none());
    }
}
