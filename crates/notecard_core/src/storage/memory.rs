//! In-process key-value store for hosts without durable storage and for tests.

use super::{KeyValueStore, KvResult};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: BTreeMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one entry, used to simulate data written by an earlier session.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> KvResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKeyValueStore;
    use crate::storage::KeyValueStore;

    #[test]
    fn set_overwrites_and_remove_is_idempotent() {
        let mut store = MemoryKeyValueStore::new();
        store.set("notes", "[]").unwrap();
        store.set("notes", "[1]").unwrap();
        assert_eq!(store.get("notes").unwrap().as_deref(), Some("[1]"));

        store.remove("notes").unwrap();
        store.remove("notes").unwrap();
        assert_eq!(store.get("notes").unwrap(), None);
        assert!(store.is_empty());
    }
}
