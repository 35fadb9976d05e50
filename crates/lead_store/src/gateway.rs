//! Persistence gateway: sole owner of the connection pool to the document store.

use std::time::Duration;

use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use tokio::sync::OnceCell;

use crate::{schema::SCHEMA_SQL, LeadStoreError, LeadStoreResult};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Lazily connected handle to the document store.
///
/// The pool is created on the first [`Gateway::ensure_connected`] call and
/// reused for the life of the gateway. Concurrent first calls share one
/// initialization. A failed attempt leaves the gateway unconnected so the
/// next call tries again; nothing retries on its own.
pub struct Gateway {
    url: String,
    max_connections: u32,
    acquire_timeout: Duration,
    pool: OnceCell<Pool<Sqlite>>,
}

impl Gateway {
    /// Creates a gateway for the given connection string. Does not connect.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            pool: OnceCell::new(),
        }
    }

    /// Sets how long a query waits for a free connection.
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Returns the pool, connecting and applying the schema on first use.
    pub async fn ensure_connected(&self) -> LeadStoreResult<&Pool<Sqlite>> {
        self.pool.get_or_try_init(|| self.connect()).await
    }

    /// Returns true once a pool has been established.
    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    /// Connects if needed and runs a trivial query.
    pub async fn ping(&self) -> LeadStoreResult<()> {
        let pool = self.ensure_connected().await?;
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Closes the pool if it was ever opened.
    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            pool.close().await;
        }
    }

    async fn connect(&self) -> LeadStoreResult<Pool<Sqlite>> {
        tracing::info!(
            max_connections = self.max_connections,
            "Connecting to lead store"
        );

        let pool = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .connect(&self.url)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to connect to lead store");
                LeadStoreError::Connection(e.to_string())
            })?;

        sqlx::raw_sql(SCHEMA_SQL).execute(&pool).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to apply lead store schema");
            LeadStoreError::Connection(format!("schema setup failed: {e}"))
        })?;

        tracing::info!("Connected to lead store");
        Ok(pool)
    }
}
