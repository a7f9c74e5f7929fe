// Redis-backed map implementation
//
// Every operation leases a pooled connection, runs one command or a short
// fixed sequence against prefixed keys, and releases the lease on return.
// Nothing is cached locally.

use async_trait::async_trait;
use redis::AsyncCommands;
use std::collections::{HashMap, HashSet};

use super::{collect_entries, require_text, KeyValueMap};
use crate::config::MapConfig;
use crate::error::MapError;
use crate::key::KeyPrefix;
use crate::pool::{ConnectionPool, PooledConnection};
use crate::text::AsText;

/// String map stored in one Redis namespace
///
/// Keys are stored as `"{prefix}:{key}"`. Two maps with the same prefix on the
/// same server see each other's writes immediately.
///
/// `put` and `remove` read the old value and then write, so concurrent
/// callers on the same key may each observe a stale previous value.
pub struct RedisMap {
    pool: ConnectionPool,
    prefix: KeyPrefix,
}

impl RedisMap {
    /// Creates a map for `host:port` with default pool settings
    ///
    /// No connection is made until the first operation.
    pub fn new(host: &str, port: u16, key_prefix: Option<&str>) -> Result<Self, MapError> {
        Self::from_config(&MapConfig::new(host, port, key_prefix))
    }

    /// Creates a map from a full configuration
    ///
    /// # Errors
    ///
    /// Returns MapError::Configuration if the configuration is invalid.
    pub fn from_config(config: &MapConfig) -> Result<Self, MapError> {
        config.validate().map_err(MapError::Configuration)?;

        let pool = ConnectionPool::new(
            &config.redis_url(),
            config.max_pool_size,
            config.connection_timeout(),
        )?;
        let prefix = KeyPrefix::new(config.key_prefix.as_deref());

        tracing::debug!(
            host = %config.host,
            port = config.port,
            db = config.db,
            prefix = prefix.as_str(),
            max_pool_size = config.max_pool_size,
            "Created Redis map"
        );

        Ok(Self { pool, prefix })
    }

    pub fn prefix(&self) -> &KeyPrefix {
        &self.prefix
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Drops the pooled connection; later operations fail with
    /// MapError::PoolClosed. Returns true if a connection was open.
    pub async fn close(&self) -> bool {
        self.pool.close().await
    }

    /// Every physical key under the prefix
    async fn scan_keys(&self, conn: &mut PooledConnection) -> Result<Vec<String>, MapError> {
        let pattern = self.prefix.pattern();
        let keys: Vec<String> = conn.keys(&pattern).await?;
        tracing::debug!(pattern = %pattern, count = keys.len(), "KEYS");
        Ok(keys
            .into_iter()
            .filter(|key| self.prefix.strip(key).is_some())
            .collect())
    }
}

#[async_trait]
impl KeyValueMap for RedisMap {
    async fn size(&self) -> Result<usize, MapError> {
        let mut conn = self.pool.get().await?;
        Ok(self.scan_keys(&mut conn).await?.len())
    }

    async fn contains_key<K>(&self, key: &K) -> Result<bool, MapError>
    where
        K: AsText + ?Sized + Sync,
    {
        let Some(key) = key.as_text() else {
            return Ok(false);
        };
        let full_key = self.prefix.full_key(key);

        let mut conn = self.pool.get().await?;
        let exists: bool = conn.exists(&full_key).await?;
        tracing::debug!(key = %full_key, exists, "EXISTS");
        Ok(exists)
    }

    async fn contains_value<V>(&self, value: &V) -> Result<bool, MapError>
    where
        V: AsText + ?Sized + Sync,
    {
        let Some(value) = value.as_text() else {
            return Ok(false);
        };

        let mut conn = self.pool.get().await?;
        for key in self.scan_keys(&mut conn).await? {
            let stored: Option<String> = conn.get(&key).await?;
            if stored.as_deref() == Some(value) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn get<K>(&self, key: &K) -> Result<Option<String>, MapError>
    where
        K: AsText + ?Sized + Sync,
    {
        let Some(key) = key.as_text() else {
            return Ok(None);
        };
        let full_key = self.prefix.full_key(key);

        let mut conn = self.pool.get().await?;
        let value: Option<String> = conn.get(&full_key).await?;
        tracing::debug!(key = %full_key, hit = value.is_some(), "GET");
        Ok(value)
    }

    async fn put<K, V>(&self, key: &K, value: &V) -> Result<Option<String>, MapError>
    where
        K: AsText + ?Sized + Sync,
        V: AsText + ?Sized + Sync,
    {
        let key = require_text(key, "Key")?;
        let value = require_text(value, "Value")?;
        let full_key = self.prefix.full_key(key);

        let mut conn = self.pool.get().await?;
        let previous: Option<String> = conn.get(&full_key).await?;
        let _: () = conn.set(&full_key, value).await?;
        tracing::debug!(key = %full_key, replaced = previous.is_some(), "SET");
        Ok(previous)
    }

    async fn remove<K>(&self, key: &K) -> Result<Option<String>, MapError>
    where
        K: AsText + ?Sized + Sync,
    {
        let Some(key) = key.as_text() else {
            return Ok(None);
        };
        let full_key = self.prefix.full_key(key);

        let mut conn = self.pool.get().await?;
        let previous: Option<String> = conn.get(&full_key).await?;
        let _: usize = conn.del(&full_key).await?;
        tracing::debug!(key = %full_key, removed = previous.is_some(), "DEL");
        Ok(previous)
    }

    async fn put_all<I, K, V>(&self, entries: I) -> Result<(), MapError>
    where
        I: IntoIterator<Item = (K, V)> + Send,
        K: AsText + Send,
        V: AsText + Send,
    {
        let entries = collect_entries(entries)?;

        let mut conn = self.pool.get().await?;
        for (key, value) in &entries {
            let _: () = conn.set(self.prefix.full_key(key), value).await?;
        }
        tracing::debug!(prefix = self.prefix.as_str(), count = entries.len(), "SET (bulk)");
        Ok(())
    }

    async fn clear(&self) -> Result<(), MapError> {
        let mut conn = self.pool.get().await?;
        let keys = self.scan_keys(&mut conn).await?;
        if keys.is_empty() {
            return Ok(());
        }

        let deleted: usize = conn.del(&keys).await?;
        tracing::debug!(prefix = self.prefix.as_str(), deleted, "DEL (clear)");
        Ok(())
    }

    async fn keys(&self) -> Result<HashSet<String>, MapError> {
        let mut conn = self.pool.get().await?;
        let keys = self.scan_keys(&mut conn).await?;
        Ok(keys
            .iter()
            .filter_map(|key| self.prefix.strip(key))
            .map(str::to_string)
            .collect())
    }

    async fn values(&self) -> Result<Vec<String>, MapError> {
        let mut conn = self.pool.get().await?;
        let keys = self.scan_keys(&mut conn).await?;

        let mut values = Vec::with_capacity(keys.len());
        for key in &keys {
            // A key deleted since the scan is skipped
            let value: Option<String> = conn.get(key).await?;
            values.extend(value);
        }
        Ok(values)
    }

    async fn entries(&self) -> Result<HashMap<String, String>, MapError> {
        let mut conn = self.pool.get().await?;
        let keys = self.scan_keys(&mut conn).await?;

        let mut entries = HashMap::with_capacity(keys.len());
        for key in &keys {
            let value: Option<String> = conn.get(key).await?;
            if let (Some(short_key), Some(value)) = (self.prefix.strip(key), value) {
                entries.insert(short_key.to_string(), value);
            }
        }
        Ok(entries)
    }
}
