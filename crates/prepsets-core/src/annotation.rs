//! Per-question star and review marks.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::question_id::QuestionId;
use crate::topic::TopicId;

/// Reviewed marks of one topic. `true` means reviewed.
pub type ReviewedMap = BTreeMap<QuestionId, bool>;

/// Star and review marks for every topic.
///
/// Entries are never expired: marks for topics that later disappear from
/// the catalog are kept as they are.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Annotations {
    pub starred: BTreeSet<QuestionId>,
    pub reviewed_by_topic: BTreeMap<TopicId, ReviewedMap>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_starred(&self, id: &QuestionId) -> bool {
        self.starred.contains(id)
    }

    /// Flips membership of `id` in the starred set. Returns the new state.
    pub fn toggle_star(&mut self, id: QuestionId) -> bool {
        if self.starred.remove(&id) {
            false
        } else {
            self.starred.insert(id);
            true
        }
    }

    pub fn is_reviewed(&self, topic: TopicId, id: &QuestionId) -> bool {
        self.reviewed_by_topic
            .get(&topic)
            .and_then(|marks| marks.get(id))
            .copied()
            .unwrap_or(false)
    }

    /// Toggles the reviewed mark of `id` within `topic`. Returns the new state.
    ///
    /// Un-marking removes the entry rather than storing `false`.
    pub fn mark_reviewed(&mut self, topic: TopicId, id: QuestionId) -> bool {
        let marks = self.reviewed_by_topic.entry(topic).or_default();
        if marks.remove(&id).unwrap_or(false) {
            false
        } else {
            marks.insert(id, true);
            true
        }
    }

    /// Clears every reviewed mark of `topic`, leaving other topics alone.
    ///
    /// Destructive: callers go through the confirmation step in
    /// [`crate::session::SessionState`] rather than calling this directly.
    pub fn reset_reviewed(&mut self, topic: TopicId) {
        self.reviewed_by_topic.insert(topic, ReviewedMap::new());
    }

    /// Number of questions in `topic` currently marked reviewed.
    pub fn count_reviewed(&self, topic: TopicId) -> usize {
        self.reviewed_by_topic
            .get(&topic)
            .map(|marks| marks.values().filter(|reviewed| **reviewed).count())
            .unwrap_or(0)
    }

    /// Review progress of `topic` as a rounded percentage of `total_items`.
    pub fn progress_percent(&self, topic: TopicId, total_items: usize) -> u8 {
        progress_percent(self.count_reviewed(topic), total_items)
    }
}

/// `round(100 * reviewed / total)`, capped at 100 and 0 for an empty topic.
pub fn progress_percent(reviewed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = (100.0 * reviewed as f64 / total as f64).round();
    percent.min(100.0) as u8
}
