//! # Key-Value Stores
//!
//! The persistence seam behind the favorites store: one string value per
//! string key, absent keys read as `None`.

use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::error::{DbError, DbResult};

// =============================================================================
// Trait
// =============================================================================

/// A string-keyed persistent store.
///
/// Implementations must make a successful `set` visible to every later `get`
/// on the same backing storage.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    /// Reads the value stored under `key`, `None` if the key was never set.
    async fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> DbResult<()>;
}

// =============================================================================
// SQLite
// =============================================================================

/// Key-value store backed by the `key_value_store` table.
#[derive(Debug, Clone)]
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    /// Creates a new SqliteKeyValueStore.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteKeyValueStore { pool }
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM key_value_store WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();

        debug!(key = %key, bytes = value.len(), "Writing key-value entry");

        sqlx::query(
            r#"
            INSERT INTO key_value_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// In-Memory
// =============================================================================

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    unavailable: bool,
}

/// In-process key-value store.
///
/// Clones share the same entries, so a test can keep a handle and inspect
/// exactly what a store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        MemoryKeyValueStore::default()
    }

    /// Makes every subsequent call fail, as a broken backend would.
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.unavailable = unavailable;
        }
    }

    fn with_inner<T>(&self, f: impl FnOnce(&mut MemoryInner) -> T) -> DbResult<T> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| DbError::Internal("memory store lock poisoned".to_string()))?;

        if inner.unavailable {
            return Err(DbError::ConnectionFailed(
                "memory store unavailable".to_string(),
            ));
        }

        Ok(f(&mut inner))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        self.with_inner(|inner| inner.entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.with_inner(|inner| {
            inner.entries.insert(key.to_string(), value.to_string());
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
