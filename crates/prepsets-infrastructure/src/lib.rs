pub mod config;
pub mod dir_topic_source;
pub mod paths;
pub mod storage;

pub use crate::config::{AppConfig, ConfigService};
pub use crate::dir_topic_source::DirTopicSource;
pub use crate::paths::PrepPaths;
pub use crate::storage::{JsonFileStore, MemoryStore};
