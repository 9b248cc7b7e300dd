//! Topic source reading `set{id}.json` files from a directory.

use async_trait::async_trait;
use prepsets_core::error::{PrepError, Result};
use prepsets_core::topic::{TopicDocument, TopicId, TopicSource};
use std::path::PathBuf;

/// Resolves topics from `<root>/set{id}.json`.
#[derive(Debug, Clone)]
pub struct DirTopicSource {
    root: PathBuf,
}

impl DirTopicSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Conventional file path of topic `id`.
    pub fn path_for(&self, id: TopicId) -> PathBuf {
        self.root.join(format!("set{}.json", id))
    }
}

#[async_trait]
impl TopicSource for DirTopicSource {
    async fn fetch(&self, id: TopicId) -> Result<TopicDocument> {
        let path = self.path_for(id);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PrepError::not_found("topic", path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        TopicDocument::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_named_set() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("set3.json"),
            r#"{"setName": "Databases", "data": [{"question": "What is an index?", "answer": "A lookup structure."}]}"#,
        )
        .unwrap();

        let source = DirTopicSource::new(temp_dir.path());
        let doc = source.fetch(TopicId(3)).await.unwrap();
        assert_eq!(doc.set_name.as_deref(), Some("Databases"));
        assert_eq!(doc.items.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let source = DirTopicSource::new(temp_dir.path());
        let err = source.fetch(TopicId(1)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_invalid_json_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("set1.json"), "[{\"question\":").unwrap();

        let source = DirTopicSource::new(temp_dir.path());
        let err = source.fetch(TopicId(1)).await.unwrap_err();
        assert!(err.is_serialization());
    }
}
