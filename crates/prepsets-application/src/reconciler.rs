//! Mirrors session state to durable key-value storage.
//!
//! Startup reads every tracked key once (hydration). Until that pass has
//! finished no write-back happens at all, otherwise the in-memory defaults
//! would overwrite what the previous session stored.

use prepsets_core::annotation::{Annotations, ReviewedMap};
use prepsets_core::error::Result;
use prepsets_core::question_id::QuestionId;
use prepsets_core::session::{SessionState, TrackedKey};
use prepsets_core::storage::KeyValueStore;
use prepsets_core::topic::TopicId;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// What the hydration pass found in storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrationReport {
    /// Keys whose stored value was applied.
    pub restored: Vec<TrackedKey>,
    /// Keys whose stored value could not be parsed and was treated as absent.
    pub discarded: Vec<TrackedKey>,
}

/// Boundary adapter between [`SessionState`] and a [`KeyValueStore`].
pub struct PersistenceReconciler {
    store: Arc<dyn KeyValueStore>,
    hydrated: AtomicBool,
}

impl PersistenceReconciler {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            hydrated: AtomicBool::new(false),
        }
    }

    /// True once [`hydrate`](Self::hydrate) has completed.
    pub fn is_hydrated(&self) -> bool {
        self.hydrated.load(Ordering::SeqCst)
    }

    /// Seeds `state` from storage and opens the write-back gate.
    ///
    /// Runs once; later calls leave `state` untouched and return an empty
    /// report. Unreadable or malformed values fall back to the defaults
    /// already in `state`.
    pub fn hydrate(&self, state: &mut SessionState) -> HydrationReport {
        let mut report = HydrationReport::default();
        if self.is_hydrated() {
            tracing::warn!("Session state already hydrated, ignoring second hydration");
            return report;
        }

        for key in TrackedKey::ALL {
            let raw = match self.store.get(key.storage_key()) {
                Ok(Some(raw)) => raw,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!("Failed to read '{}': {}", key.storage_key(), e);
                    report.discarded.push(key);
                    continue;
                }
            };

            if apply_stored_value(state, key, &raw) {
                report.restored.push(key);
            } else {
                tracing::warn!("Discarding malformed value for '{}'", key.storage_key());
                report.discarded.push(key);
            }
        }

        self.hydrated.store(true, Ordering::SeqCst);
        tracing::info!(
            restored = report.restored.len(),
            discarded = report.discarded.len(),
            "Session state hydrated"
        );
        report
    }

    /// Writes the given keys of `state` back to storage.
    ///
    /// Does nothing before hydration. Write failures are logged and
    /// swallowed; the in-memory state stays authoritative.
    pub fn persist(&self, state: &SessionState, keys: &[TrackedKey]) {
        if !self.is_hydrated() {
            if !keys.is_empty() {
                tracing::debug!("Skipping write-back of {:?} before hydration", keys);
            }
            return;
        }

        for key in keys {
            if let Err(e) = self.write_key(state, *key) {
                tracing::warn!("Failed to persist '{}': {}", key.storage_key(), e);
            }
        }
    }

    fn write_key(&self, state: &SessionState, key: TrackedKey) -> Result<()> {
        let name = key.storage_key();
        match key {
            TrackedKey::SelectedTopic => match state.selected_topic {
                Some(topic) => self.store.set(name, &topic.to_string()),
                None => self.store.remove(name),
            },
            TrackedKey::Query => self.store.set(name, &state.query),
            TrackedKey::StarOnly => self.store.set(name, &state.star_only.to_string()),
            TrackedKey::CurrentPage => self.store.set(name, &state.current_page.to_string()),
            TrackedKey::Starred => {
                self.store.set(name, &encode_starred(&state.annotations)?)
            }
            TrackedKey::Reviewed => {
                self.store.set(name, &encode_reviewed(&state.annotations)?)
            }
        }
    }
}

/// Applies one stored value. Returns false if it was malformed.
fn apply_stored_value(state: &mut SessionState, key: TrackedKey, raw: &str) -> bool {
    match key {
        TrackedKey::SelectedTopic => match raw.parse::<TopicId>() {
            Ok(topic) => {
                state.selected_topic = Some(topic);
                true
            }
            Err(_) => false,
        },
        TrackedKey::Query => {
            state.query = raw.to_string();
            true
        }
        TrackedKey::StarOnly => match raw.trim().parse::<bool>() {
            Ok(star_only) => {
                state.star_only = star_only;
                true
            }
            Err(_) => false,
        },
        TrackedKey::CurrentPage => match raw.trim().parse::<usize>() {
            Ok(page) if page >= 1 => {
                state.current_page = page;
                true
            }
            _ => false,
        },
        TrackedKey::Starred => match decode_starred(raw) {
            Some(starred) => {
                state.annotations.starred = starred;
                true
            }
            None => false,
        },
        TrackedKey::Reviewed => match decode_reviewed(raw) {
            Some(reviewed) => {
                state.annotations.reviewed_by_topic = reviewed;
                true
            }
            None => false,
        },
    }
}

/// `["1-0","2-3"]`, sorted.
fn encode_starred(annotations: &Annotations) -> Result<String> {
    let ids: Vec<&str> = annotations.starred.iter().map(QuestionId::as_str).collect();
    Ok(serde_json::to_string(&ids)?)
}

fn decode_starred(raw: &str) -> Option<BTreeSet<QuestionId>> {
    let ids: Vec<String> = serde_json::from_str(raw).ok()?;
    Some(ids.into_iter().map(QuestionId::from_raw).collect())
}

/// `{"1":{"1-0":true}}`
fn encode_reviewed(annotations: &Annotations) -> Result<String> {
    let nested: BTreeMap<String, BTreeMap<&str, bool>> = annotations
        .reviewed_by_topic
        .iter()
        .map(|(topic, marks)| {
            let marks = marks.iter().map(|(id, reviewed)| (id.as_str(), *reviewed)).collect();
            (topic.to_string(), marks)
        })
        .collect();
    Ok(serde_json::to_string(&nested)?)
}

fn decode_reviewed(raw: &str) -> Option<BTreeMap<TopicId, ReviewedMap>> {
    let nested: BTreeMap<String, BTreeMap<String, bool>> = serde_json::from_str(raw).ok()?;
    let mut reviewed = BTreeMap::new();
    for (topic, marks) in nested {
        let topic: TopicId = topic.parse().ok()?;
        let marks = marks
            .into_iter()
            .map(|(id, flag)| (QuestionId::from_raw(id), flag))
            .collect();
        reviewed.insert(topic, marks);
    }
    Some(reviewed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reviewed_encoding_shape() {
        let mut annotations = Annotations::new();
        annotations.mark_reviewed(TopicId(1), QuestionId::from("1-0"));
        annotations.mark_reviewed(TopicId(12), QuestionId::from("12-3"));

        let encoded = encode_reviewed(&annotations).unwrap();
        assert_eq!(encoded, r#"{"1":{"1-0":true},"12":{"12-3":true}}"#);
        assert_eq!(decode_reviewed(&encoded), Some(annotations.reviewed_by_topic));
    }

    #[test]
    fn test_starred_encoding_is_sorted_list() {
        let mut annotations = Annotations::new();
        annotations.toggle_star(QuestionId::from("2-0"));
        annotations.toggle_star(QuestionId::from("1-4"));
        assert_eq!(encode_starred(&annotations).unwrap(), r#"["1-4","2-0"]"#);
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        assert_eq!(decode_starred("{\"not\": \"a list\"}"), None);
        assert_eq!(decode_starred("[1, 2]"), None);
        assert_eq!(decode_reviewed("[]"), None);
        assert_eq!(decode_reviewed(r#"{"one":{"1-0":true}}"#), None);
        assert_eq!(decode_reviewed(r#"{"1":{"1-0":"yes"}}"#), None);
    }
}
