//! # Key-Value Stores
//!
//! The text-only storage the repositories sit on.
//!
//! ```text
//! ┌──────────────────────┐      ┌──────────────────────────────────────┐
//! │  LocalRepository<T>  │─────►│  KeyValueStore                       │
//! │  JSON array per key  │      │  ├── MemoryStore  (HashMap, tests)   │
//! └──────────────────────┘      │  └── Database     (SQLite kv_store)  │
//!                               └──────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::DbResult;

/// Async string store keyed by collection name.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    async fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> DbResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> DbResult<()>;
}

/// Process-local store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> DbResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("jiko.sales").await.unwrap(), None);

        store.set("jiko.sales", "[]").await.unwrap();
        assert_eq!(store.get("jiko.sales").await.unwrap().as_deref(), Some("[]"));

        store.set("jiko.sales", "[1]").await.unwrap();
        assert_eq!(store.get("jiko.sales").await.unwrap().as_deref(), Some("[1]"));

        store.remove("jiko.sales").await.unwrap();
        store.remove("jiko.sales").await.unwrap();
        assert_eq!(store.get("jiko.sales").await.unwrap(), None);
    }
}
