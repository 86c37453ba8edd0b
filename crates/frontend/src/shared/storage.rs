//! Key/value browser storage (localStorage / sessionStorage).
//!
//! Everything that persists client state goes through [`KeyValueStore`] so the
//! logic built on top of it can run against [`MemoryStorage`] in tests.

use serde::{de::DeserializeOwned, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Window storage areas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserStorage {
    Local,
    Session,
}

impl BrowserStorage {
    fn area(&self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match self {
            BrowserStorage::Local => window.local_storage().ok()?,
            BrowserStorage::Session => window.session_storage().ok()?,
        }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.area()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(area) = self.area() {
            if area.set_item(key, value).is_err() {
                log::warn!("Failed to write {} to {:?} storage", key, self);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(area) = self.area() {
            let _ = area.remove_item(key);
        }
    }
}

/// In-memory store with the same semantics as the browser areas
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Read and decode a JSON value; undecodable entries read as `None`.
pub fn read_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed storage entry {}: {}", key, e);
            None
        }
    }
}

pub fn write_json<T: Serialize>(store: &impl KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(e) => log::error!("Failed to serialize storage entry {}: {}", key, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let store = MemoryStorage::new();
        store.set("a", "1");
        assert_eq!(store.get("a").as_deref(), Some("1"));
        store.remove("a");
        assert!(store.get("a").is_none());
    }

    #[test]
    fn test_malformed_json_reads_as_none() {
        let store = MemoryStorage::new();
        store.set("state", "{not json");
        assert!(read_json::<Vec<u32>>(&store, "state").is_none());

        write_json(&store, "state", &vec![1u32, 2]);
        assert_eq!(read_json::<Vec<u32>>(&store, "state"), Some(vec![1, 2]));
    }
}
