//! Key-value store trait.

use std::sync::Arc;

use crate::error::Result;

/// Durable string key-value storage shared by the whole process.
///
/// Last writer wins per key and there are no transactions across keys.
/// Reads are synchronous so the initial hydration can complete before the
/// first view is rendered.
pub trait KeyValueStore: Send + Sync {
    /// Reads `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: Key present
    /// - `Ok(None)`: Key never written or removed
    /// - `Err(_)`: The backing storage could not be read
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
