//! Key-value store persisted as one JSON object on disk.
//!
//! Writes go through a temporary file and an atomic rename while holding an
//! exclusive advisory lock, so a crash never leaves a half-written state file.

use prepsets_core::error::{PrepError, Result};
use prepsets_core::storage::KeyValueStore;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

type Entries = BTreeMap<String, String>;

/// A [`KeyValueStore`] backed by a JSON file such as `state.json`.
///
/// The whole map is read once when the store is opened and cached; every
/// write updates the cache and rewrites the file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<Entries>,
}

impl JsonFileStore {
    /// Opens the store at `path`.
    ///
    /// A missing or empty file is an empty store. A file that is not a JSON
    /// object of strings is also treated as empty (and logged); it will be
    /// replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match load_entries(&path) {
            Ok(entries) => entries,
            Err(e) if e.is_serialization() => {
                tracing::warn!("Ignoring unreadable state file {:?}: {}", path, e);
                Entries::new()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Entries),
    {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| PrepError::storage(format!("State cache poisoned: {}", e)))?;

        let _lock = FileLock::acquire(&self.path)?;
        f(&mut entries);
        save_entries(&self.path, &entries)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| PrepError::storage(format!("State cache poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

fn load_entries(path: &Path) -> Result<Entries> {
    if !path.exists() {
        return Ok(Entries::new());
    }

    // Bytes, so a file that is not UTF-8 surfaces as a JSON error
    let content = fs::read(path)?;
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Entries::new());
    }

    Ok(serde_json::from_slice(&content)?)
}

fn save_entries(path: &Path, entries: &Entries) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(entries)?;

    // Write to temporary file in the same directory
    let tmp_path = temp_path(path)?;
    let mut tmp_file = File::create(&tmp_path)?;
    tmp_file.write_all(json.as_bytes())?;
    tmp_file.sync_all()?;
    drop(tmp_file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| PrepError::io(format!("Path has no file name: {}", path.display())))?;
    let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

/// An exclusive lock on `<state>.lock`, released when the handle closes.
///
/// The lock file is never unlinked: a writer blocked on it must lock the same
/// inode the next writer will open.
struct FileLock {
    #[allow(dead_code)]
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| PrepError::storage(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file })
    }
}
