#![allow(dead_code)]

use async_trait::async_trait;
use prepsets_core::clipboard::Clipboard;
use prepsets_core::error::{PrepError, Result};
use prepsets_core::session::SessionSettings;
use prepsets_core::storage::KeyValueStore;
use prepsets_core::topic::{QaItem, TopicDocument, TopicId, TopicSource};
use prepsets_infrastructure::MemoryStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Topic source with canned documents and per-topic latency.
#[derive(Default)]
pub struct StubSource {
    topics: HashMap<TopicId, (TopicDocument, Duration)>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_topic(mut self, id: u32, name: Option<&str>, items: Vec<QaItem>) -> Self {
        self.topics.insert(
            TopicId(id),
            (
                TopicDocument {
                    set_name: name.map(str::to_string),
                    items,
                },
                Duration::ZERO,
            ),
        );
        self
    }

    pub fn with_latency(mut self, id: u32, latency: Duration) -> Self {
        if let Some(entry) = self.topics.get_mut(&TopicId(id)) {
            entry.1 = latency;
        }
        self
    }
}

#[async_trait]
impl TopicSource for StubSource {
    async fn fetch(&self, id: TopicId) -> Result<TopicDocument> {
        match self.topics.get(&id) {
            Some((doc, latency)) => {
                tokio::time::sleep(*latency).await;
                Ok(doc.clone())
            }
            None => Err(PrepError::not_found("topic", id.to_string())),
        }
    }
}

/// Memory store that remembers every write.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    writes: Mutex<Vec<(String, Option<String>)>>,
}

impl RecordingStore {
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            inner: MemoryStore::with_entries(entries),
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn writes(&self) -> Vec<(String, Option<String>)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn writes_to(&self, key: &str) -> Vec<Option<String>> {
        self.writes()
            .into_iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v)
            .collect()
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.inner.get(key).unwrap()
    }
}

impl KeyValueStore for RecordingStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), Some(value.to_string())));
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.writes.lock().unwrap().push((key.to_string(), None));
        self.inner.remove(key)
    }
}

/// Clipboard that records what was copied, or always fails.
#[derive(Default)]
pub struct RecordingClipboard {
    pub copied: Mutex<Vec<String>>,
    pub unavailable: bool,
}

impl Clipboard for RecordingClipboard {
    fn copy_text(&self, text: &str) -> Result<()> {
        if self.unavailable {
            return Err(PrepError::clipboard("no clipboard"));
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub fn numbered_items(count: usize) -> Vec<QaItem> {
    (0..count)
        .map(|i| QaItem::new(format!("Question {i}"), format!("Answer {i}")))
        .collect()
}

pub fn immediate_settings() -> SessionSettings {
    SessionSettings::immediate()
}

pub fn arc_source(source: StubSource) -> Arc<dyn TopicSource> {
    Arc::new(source)
}
