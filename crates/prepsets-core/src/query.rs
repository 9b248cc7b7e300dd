//! Free-text and star filtering of a topic's question list.

use std::collections::BTreeSet;

use crate::question_id::QuestionId;
use crate::topic::{QaItem, TopicId};

/// An item that survived filtering, together with its position in the
/// unfiltered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedItem<'a> {
    pub position: usize,
    pub item: &'a QaItem,
}

impl IndexedItem<'_> {
    pub fn question_id(&self, topic: TopicId) -> QuestionId {
        QuestionId::new(topic, self.position)
    }
}

/// Case-insensitive substring match on question or answer.
pub fn matches_query(item: &QaItem, needle_lower: &str) -> bool {
    needle_lower.is_empty()
        || item.question.to_lowercase().contains(needle_lower)
        || item.answer.to_lowercase().contains(needle_lower)
}

/// Derives the visible subset of `items`.
///
/// The result keeps the relative order of `items`. Star membership is
/// checked with the item's unfiltered position, so the text and star
/// criteria compose in either order.
pub fn filter_items<'a>(
    items: &'a [QaItem],
    query: &str,
    star_only: bool,
    starred: &BTreeSet<QuestionId>,
    topic: TopicId,
) -> Vec<IndexedItem<'a>> {
    let needle = query.to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(position, _)| !star_only || starred.contains(&QuestionId::new(topic, *position)))
        .filter(|(_, item)| matches_query(item, &needle))
        .map(|(position, item)| IndexedItem { position, item })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<QaItem> {
        vec![
            QaItem::new("What is closure in JavaScript?", "A function with its scope."),
            QaItem::new("Explain the event loop.", "Runs async callbacks."),
            QaItem::new("What is hoisting?", "Declarations move up; closures unaffected."),
            QaItem::new("What is React?", "A UI library."),
        ]
    }

    fn positions(filtered: &[IndexedItem<'_>]) -> Vec<usize> {
        filtered.iter().map(|entry| entry.position).collect()
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let items = items();
        let filtered = filter_items(&items, "", false, &BTreeSet::new(), TopicId(1));
        assert_eq!(positions(&filtered), vec![0, 1, 2, 3]);
        assert!(filtered.iter().zip(&items).all(|(entry, item)| entry.item == item));
    }

    #[test]
    fn test_query_matches_question_or_answer_case_insensitively() {
        let items = items();
        let filtered = filter_items(&items, "CLOSURE", false, &BTreeSet::new(), TopicId(1));
        assert_eq!(positions(&filtered), vec![0, 2]);

        let filtered = filter_items(&items, "ui lib", false, &BTreeSet::new(), TopicId(1));
        assert_eq!(positions(&filtered), vec![3]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let items = items();
        let filtered = filter_items(&items, "kubernetes", false, &BTreeSet::new(), TopicId(1));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_star_only_uses_unfiltered_positions() {
        let items = items();
        let starred: BTreeSet<_> = ["1-2", "1-3", "2-0"].into_iter().map(QuestionId::from).collect();

        let filtered = filter_items(&items, "", true, &starred, TopicId(1));
        assert_eq!(positions(&filtered), vec![2, 3]);

        // Star and text criteria combine.
        let filtered = filter_items(&items, "closure", true, &starred, TopicId(1));
        assert_eq!(positions(&filtered), vec![2]);
        assert_eq!(filtered[0].question_id(TopicId(1)).as_str(), "1-2");
    }

    #[test]
    fn test_star_only_scoped_to_topic() {
        let items = items();
        let starred: BTreeSet<_> = ["2-0"].into_iter().map(QuestionId::from).collect();
        assert!(filter_items(&items, "", true, &starred, TopicId(1)).is_empty());
        assert_eq!(positions(&filter_items(&items, "", true, &starred, TopicId(2))), vec![0]);
    }

    #[test]
    fn test_result_is_ordered_subsequence() {
        let items = items();
        for query in ["", "what", "a", "is", "zzz"] {
            let filtered = filter_items(&items, query, false, &BTreeSet::new(), TopicId(1));
            let pos = positions(&filtered);
            assert!(pos.windows(2).all(|w| w[0] < w[1]));
            assert!(filtered.iter().all(|entry| &items[entry.position] == entry.item));
        }
    }
}
