//! Stable keys for annotating questions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::topic::TopicId;

/// Identifies one question as `"{topicId}-{position}"`.
///
/// `position` is the index in the topic's unfiltered list, so the id stays
/// the same however the list is filtered. It does not survive edits that
/// reorder or remove items in the underlying set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(topic: TopicId, position: usize) -> Self {
        Self(format!("{}-{}", topic, position))
    }

    /// Wraps an id read back from storage without validating it.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the id into its topic and position, if it is well formed.
    pub fn parts(&self) -> Option<(TopicId, usize)> {
        let (topic, position) = self.0.split_once('-')?;
        Some((topic.parse().ok()?, position.parse().ok()?))
    }

    pub fn topic(&self) -> Option<TopicId> {
        self.parts().map(|(topic, _)| topic)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(raw: &str) -> Self {
        Self::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(QuestionId::new(TopicId(2), 0).as_str(), "2-0");
        assert_eq!(QuestionId::new(TopicId(12), 31).to_string(), "12-31");
    }

    #[test]
    fn test_parts() {
        assert_eq!(QuestionId::from("3-14").parts(), Some((TopicId(3), 14)));
        assert_eq!(QuestionId::from("garbage").parts(), None);
        assert_eq!(QuestionId::from("3-x").parts(), None);
        assert_eq!(QuestionId::from("3-1").topic(), Some(TopicId(3)));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&QuestionId::new(TopicId(1), 4)).unwrap();
        assert_eq!(json, "\"1-4\"");
    }
}
