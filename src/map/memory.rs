// In-process map implementation
//
// Same contract as RedisMap without a server. Clones share one table.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::{collect_entries, require_text, KeyValueMap};
use crate::error::MapError;
use crate::text::AsText;

/// String map held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryMap {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryMap {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueMap for MemoryMap {
    async fn size(&self) -> Result<usize, MapError> {
        Ok(self.entries.read().len())
    }

    async fn contains_key<K>(&self, key: &K) -> Result<bool, MapError>
    where
        K: AsText + ?Sized + Sync,
    {
        Ok(key
            .as_text()
            .is_some_and(|key| self.entries.read().contains_key(key)))
    }

    async fn contains_value<V>(&self, value: &V) -> Result<bool, MapError>
    where
        V: AsText + ?Sized + Sync,
    {
        Ok(value
            .as_text()
            .is_some_and(|value| self.entries.read().values().any(|v| v == value)))
    }

    async fn get<K>(&self, key: &K) -> Result<Option<String>, MapError>
    where
        K: AsText + ?Sized + Sync,
    {
        Ok(key
            .as_text()
            .and_then(|key| self.entries.read().get(key).cloned()))
    }

    async fn put<K, V>(&self, key: &K, value: &V) -> Result<Option<String>, MapError>
    where
        K: AsText + ?Sized + Sync,
        V: AsText + ?Sized + Sync,
    {
        let key = require_text(key, "Key")?;
        let value = require_text(value, "Value")?;
        Ok(self
            .entries
            .write()
            .insert(key.to_string(), value.to_string()))
    }

    async fn remove<K>(&self, key: &K) -> Result<Option<String>, MapError>
    where
        K: AsText + ?Sized + Sync,
    {
        Ok(key
            .as_text()
            .and_then(|key| self.entries.write().remove(key)))
    }

    async fn put_all<I, K, V>(&self, entries: I) -> Result<(), MapError>
    where
        I: IntoIterator<Item = (K, V)> + Send,
        K: AsText + Send,
        V: AsText + Send,
    {
        let pairs = collect_entries(entries)?;
        self.entries.write().extend(pairs);
        Ok(())
    }

    async fn clear(&self) -> Result<(), MapError> {
        self.entries.write().clear();
        Ok(())
    }

    async fn keys(&self) -> Result<HashSet<String>, MapError> {
        Ok(self.entries.read().keys().cloned().collect())
    }

    async fn values(&self) -> Result<Vec<String>, MapError> {
        Ok(self.entries.read().values().cloned().collect())
    }

    async fn entries(&self) -> Result<HashMap<String, String>, MapError> {
        Ok(self.entries.read().clone())
    }
}
