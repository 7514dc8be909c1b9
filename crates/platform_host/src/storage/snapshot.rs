//! Snapshot persistence contracts and adapters for the explorer's flat key-value storage.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Durable key-value storage the explorer serializes its snapshot records to.
///
/// Writes are synchronous; a failed save is reported to the caller and never retried here.
pub trait SnapshotStore {
    /// Loads the raw JSON string stored under `key`.
    fn load_record(&self, key: &str) -> Result<Option<String>, String>;

    /// Saves a raw JSON string under `key`, replacing any previous value.
    fn save_record(&self, key: &str, raw_json: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Default)]
/// In-memory snapshot store keyed by string.
///
/// Clones share the same backing map, so a test can keep a handle while a session owns another.
pub struct MemorySnapshotStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
    fail_saves: Rc<RefCell<bool>>,
}

impl MemorySnapshotStore {
    /// Makes every subsequent save fail until switched back off.
    pub fn set_fail_saves(&self, fail: bool) {
        *self.fail_saves.borrow_mut() = fail;
    }

    /// Returns the stored keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = self.inner.borrow().keys().cloned().collect::<Vec<_>>();
        keys.sort();
        keys
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load_record(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save_record(&self, key: &str, raw_json: &str) -> Result<(), String> {
        if *self.fail_saves.borrow() {
            return Err(format!("snapshot save rejected for `{key}`"));
        }
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        Ok(())
    }
}

/// Loads and deserializes a typed record through a [`SnapshotStore`] implementation.
///
/// # Errors
///
/// Returns an error when the store or JSON deserialization fails.
pub fn load_record_with<S: SnapshotStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_record(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| format!("record `{key}`: {e}"))?;
    Ok(Some(value))
}

/// Serializes and saves a typed record through a [`SnapshotStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or store save fails.
pub fn save_record_with<S: SnapshotStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.save_record(key, &raw)
}
