//! String map trait definition
//!
//! This module defines the `KeyValueMap` trait: an associative container of
//! text keys to text values. `RedisMap` backs it with a Redis namespace and
//! `MemoryMap` with an in-process table.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

use crate::error::MapError;
use crate::text::AsText;

pub mod memory;
pub mod redis_map;

pub use memory::MemoryMap;
pub use redis_map::RedisMap;

/// Associative container of text keys to text values
///
/// Query operations treat non-text arguments as absent. Writes reject them
/// with MapError::InvalidArgument. Collection views are snapshots taken at
/// call time.
#[async_trait]
pub trait KeyValueMap: Send + Sync {
    /// Number of entries
    async fn size(&self) -> Result<usize, MapError>;

    async fn is_empty(&self) -> Result<bool, MapError> {
        Ok(self.size().await? == 0)
    }

    async fn contains_key<K>(&self, key: &K) -> Result<bool, MapError>
    where
        K: AsText + ?Sized + Sync;

    /// Linear scan over every entry
    async fn contains_value<V>(&self, value: &V) -> Result<bool, MapError>
    where
        V: AsText + ?Sized + Sync;

    async fn get<K>(&self, key: &K) -> Result<Option<String>, MapError>
    where
        K: AsText + ?Sized + Sync;

    /// Stores `value` under `key` and returns the previous value
    async fn put<K, V>(&self, key: &K, value: &V) -> Result<Option<String>, MapError>
    where
        K: AsText + ?Sized + Sync,
        V: AsText + ?Sized + Sync;

    /// Deletes `key` and returns the value it held
    async fn remove<K>(&self, key: &K) -> Result<Option<String>, MapError>
    where
        K: AsText + ?Sized + Sync;

    /// Stores every pair. All pairs are validated before the first write;
    /// a store failure midway keeps the pairs already written.
    async fn put_all<I, K, V>(&self, entries: I) -> Result<(), MapError>
    where
        I: IntoIterator<Item = (K, V)> + Send,
        K: AsText + Send,
        V: AsText + Send;

    async fn clear(&self) -> Result<(), MapError>;

    async fn keys(&self) -> Result<HashSet<String>, MapError>;

    /// Values in no particular order, duplicates kept
    async fn values(&self) -> Result<Vec<String>, MapError>;

    async fn entries(&self) -> Result<HashMap<String, String>, MapError>;
}

/// Text form of a write argument, or InvalidArgument
pub(crate) fn require_text<'a, T>(arg: &'a T, what: &str) -> Result<&'a str, MapError>
where
    T: AsText + ?Sized,
{
    arg.as_text()
        .ok_or_else(|| MapError::invalid_argument(format!("{} cannot be null or non-text", what)))
}

/// Validates every pair of a bulk write before anything is stored
pub(crate) fn collect_entries<I, K, V>(entries: I) -> Result<Vec<(String, String)>, MapError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsText,
    V: AsText,
{
    entries
        .into_iter()
        .map(|(key, value)| match (key.as_text(), value.as_text()) {
            (Some(k), Some(v)) => Ok((k.to_string(), v.to_string())),
            _ => Err(MapError::invalid_argument("Key or value in map cannot be null")),
        })
        .collect()
}
