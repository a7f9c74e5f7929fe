// Bounded connection pool over a Redis connection manager
//
// The manager multiplexes commands over one reconnecting connection; the
// semaphore bounds how many round trips may be in flight at once. A lease
// holds one permit and gives it back when dropped.

use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{Client, RedisError};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};

use crate::error::MapError;

/// Connection pool owned by one map instance
pub struct ConnectionPool {
    client: Client,
    manager: Mutex<Option<ConnectionManager>>,
    permits: Arc<Semaphore>,
    max_size: usize,
    connection_timeout: Duration,
}

/// A connection borrowed from the pool for one operation
pub struct PooledConnection {
    connection: ConnectionManager,
    _permit: OwnedSemaphorePermit,
}

impl ConnectionPool {
    /// Creates a pool without connecting
    ///
    /// # Errors
    ///
    /// Returns MapError::Configuration if the URL cannot be parsed or
    /// `max_size` is zero.
    pub fn new(
        redis_url: &str,
        max_size: usize,
        connection_timeout: Duration,
    ) -> Result<Self, MapError> {
        if max_size == 0 {
            return Err(MapError::Configuration(
                "max_pool_size must be greater than 0".to_string(),
            ));
        }

        let client = Client::open(redis_url)
            .map_err(|e| MapError::Configuration(format!("Invalid Redis URL: {}", e)))?;

        Ok(Self {
            client,
            manager: Mutex::new(None),
            permits: Arc::new(Semaphore::new(max_size)),
            max_size,
            connection_timeout,
        })
    }

    /// Borrows a connection, waiting for a free slot first
    ///
    /// The first call establishes the connection. A failed attempt is not
    /// kept, so later calls try again.
    pub async fn get(&self) -> Result<PooledConnection, MapError> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| MapError::PoolClosed)?;

        let mut manager = self.manager.lock().await;
        // close() may have run while this call waited for the lock
        if self.is_closed() {
            return Err(MapError::PoolClosed);
        }
        let connection = match manager.clone() {
            Some(connection) => connection,
            None => {
                let connection = self.connect().await?;
                *manager = Some(connection.clone());
                connection
            }
        };

        Ok(PooledConnection {
            connection,
            _permit: permit,
        })
    }

    /// Connects once; a refused or failed connect is returned as the client reported it
    async fn connect(&self) -> Result<ConnectionManager, RedisError> {
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(0)
            .set_connection_timeout(Some(self.connection_timeout));

        match ConnectionManager::new_with_config(self.client.clone(), config).await {
            Ok(manager) => {
                tracing::info!(max_pool_size = self.max_size, "Connected to Redis");
                Ok(manager)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to connect to Redis");
                Err(e)
            }
        }
    }

    /// True once a connection has been established and not yet released
    pub async fn is_connected(&self) -> bool {
        self.manager.lock().await.is_some()
    }

    /// Number of leases that can be handed out right now
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Refuses further leases and drops the pooled connection
    ///
    /// Leases already handed out keep their own handle until dropped.
    /// Returns true if a connection was released.
    pub async fn close(&self) -> bool {
        self.permits.close();
        let released = self.manager.lock().await.take().is_some();
        if released {
            tracing::info!("Released Redis connection");
        }
        released
    }

    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }
}

impl Deref for PooledConnection {
    type Target = ConnectionManager;

    fn deref(&self) -> &Self::Target {
        &self.connection
    }
}

impl DerefMut for PooledConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.connection
    }
}
