//! # Favorites Store
//!
//! The durable set of favorited product ids.
//!
//! ## Read-Modify-Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  toggle(7)                                                             │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  lock write_lock ──► get(key) ──► "[3,1]" ──► FavoriteSet {3, 1}       │
//! │                                                    │                    │
//! │                                                    ▼ toggle(7)          │
//! │                      set(key, "[3,1,7]") ◄── FavoriteSet {3, 1, 7}     │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  unlock, return true                                                   │
//! │                                                                         │
//! │  Every mutation rewrites the whole array. No batching, no debounce.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads never fail: an unreachable backend, a missing key or an unreadable
//! value all read as the empty set (with a warning in the log). Mutations
//! are stricter: if the current value cannot be read, nothing is written and
//! the error is returned.

use explorer_core::{FavoriteSet, ProductId};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::kv::KeyValueStore;

/// Storage key used when none is configured.
pub const DEFAULT_FAVORITES_KEY: &str = "product-favorites";

/// Favorites persisted as a JSON array under a single key.
#[derive(Debug)]
pub struct FavoritesStore<S> {
    store: S,
    key: String,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Creates a store using [`DEFAULT_FAVORITES_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_FAVORITES_KEY)
    }

    /// Creates a store persisting under `key`.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        info!(key = %key, "Opening favorites store");
        FavoritesStore {
            store,
            key,
            write_lock: Mutex::new(()),
        }
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the current favorites.
    ///
    /// Never fails; see the module docs.
    pub async fn get_all(&self) -> FavoriteSet {
        match self.load().await {
            Ok(set) => set,
            Err(err) => {
                warn!(key = %self.key, error = %err, "Favorites unreadable, using empty set");
                FavoriteSet::new()
            }
        }
    }

    /// Returns true if `id` is currently a favorite.
    pub async fn contains(&self, id: ProductId) -> bool {
        self.get_all().await.contains(id)
    }

    /// Adds `id`. Adding an existing favorite still rewrites the same value.
    pub async fn add(&self, id: ProductId) -> DbResult<()> {
        self.update(id, |set| {
            set.insert(id);
        })
        .await
    }

    /// Removes `id`. Removing an absent id is a no-op write.
    pub async fn remove(&self, id: ProductId) -> DbResult<()> {
        self.update(id, |set| {
            set.remove(id);
        })
        .await
    }

    /// Flips membership of `id` and returns whether it is now a favorite.
    pub async fn toggle(&self, id: ProductId) -> DbResult<bool> {
        let mut now_favorite = false;
        self.update(id, |set| now_favorite = set.toggle(id)).await?;
        Ok(now_favorite)
    }

    async fn load(&self) -> DbResult<FavoriteSet> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(FavoriteSet::new());
        };

        serde_json::from_str(&raw).map_err(|e| DbError::invalid_value(&self.key, e))
    }

    async fn update(&self, id: ProductId, mutate: impl FnOnce(&mut FavoriteSet)) -> DbResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut set = self.load().await?;
        mutate(&mut set);

        let value =
            serde_json::to_string(&set).map_err(|e| DbError::invalid_value(&self.key, e))?;
        self.store.set(&self.key, &value).await?;

        debug!(key = %self.key, id, favorites = set.len(), "Favorites persisted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::kv::MemoryKeyValueStore;

    fn memory_store() -> (FavoritesStore<MemoryKeyValueStore>, MemoryKeyValueStore) {
        let backend = MemoryKeyValueStore::new();
        (FavoritesStore::new(backend.clone()), backend)
    }

    async fn raw(backend: &MemoryKeyValueStore) -> Option<String> {
        backend.get(DEFAULT_FAVORITES_KEY).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_when_key_absent() {
        let (store, _) = memory_store();
        assert!(store.get_all().await.is_empty());
        assert!(!store.contains(1).await);
    }

    #[tokio::test]
    async fn test_add_persists_immediately() {
        let (store, backend) = memory_store();

        store.add(3).await.unwrap();
        store.add(1).await.unwrap();

        assert_eq!(raw(&backend).await.as_deref(), Some("[3,1]"));
        assert!(store.contains(3).await);
    }

    #[tokio::test]
    async fn test_add_and_remove_are_idempotent() {
        let (store, backend) = memory_store();

        store.add(5).await.unwrap();
        store.add(5).await.unwrap();
        assert_eq!(raw(&backend).await.as_deref(), Some("[5]"));

        store.remove(5).await.unwrap();
        store.remove(5).await.unwrap();
        assert_eq!(raw(&backend).await.as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_serialization() {
        let (store, backend) = memory_store();
        store.add(4).await.unwrap();
        store.add(9).await.unwrap();
        let before = raw(&backend).await;

        assert!(store.toggle(12).await.unwrap());
        assert!(store.contains(12).await);
        assert!(!store.toggle(12).await.unwrap());

        assert_eq!(raw(&backend).await, before);
    }

    #[tokio::test]
    async fn test_unreadable_value_reads_as_empty() {
        let (store, backend) = memory_store();

        backend.set(DEFAULT_FAVORITES_KEY, "not json").await.unwrap();
        assert!(store.get_all().await.is_empty());

        backend
            .set(DEFAULT_FAVORITES_KEY, r#"{"ids":[1]}"#)
            .await
            .unwrap();
        assert!(store.get_all().await.is_empty());

        assert!(matches!(
            store.add(2).await,
            Err(DbError::InvalidValue { .. })
        ));
        assert_eq!(raw(&backend).await.as_deref(), Some(r#"{"ids":[1]}"#));
    }

    /// Reads fail, writes succeed.
    #[derive(Debug, Clone, Default)]
    struct FlakyReads {
        inner: MemoryKeyValueStore,
    }

    impl KeyValueStore for FlakyReads {
        async fn get(&self, _key: &str) -> DbResult<Option<String>> {
            Err(DbError::ConnectionFailed("read timed out".to_string()))
        }

        async fn set(&self, key: &str, value: &str) -> DbResult<()> {
            self.inner.set(key, value).await
        }
    }

    #[tokio::test]
    async fn test_failed_read_aborts_mutation() {
        let backend = FlakyReads::default();
        backend.inner.set(DEFAULT_FAVORITES_KEY, "[1,2,3,4]").await.unwrap();
        let store = FavoritesStore::new(backend.clone());

        assert!(matches!(store.add(9).await, Err(DbError::ConnectionFailed(_))));
        assert!(store.toggle(1).await.is_err());
        assert!(store.remove(2).await.is_err());

        assert_eq!(
            backend.inner.get(DEFAULT_FAVORITES_KEY).await.unwrap().as_deref(),
            Some("[1,2,3,4]")
        );
    }

    #[tokio::test]
    async fn test_duplicates_in_storage_collapse() {
        let (store, backend) = memory_store();
        backend.set(DEFAULT_FAVORITES_KEY, "[2,2,7]").await.unwrap();

        assert_eq!(store.get_all().await.as_slice(), &[2, 7]);

        store.remove(7).await.unwrap();
        assert_eq!(raw(&backend).await.as_deref(), Some("[2]"));
    }

    #[tokio::test]
    async fn test_unavailable_backend() {
        let (store, backend) = memory_store();
        store.add(1).await.unwrap();

        backend.set_unavailable(true);
        assert!(store.get_all().await.is_empty());
        assert!(store.toggle(1).await.is_err());

        backend.set_unavailable(false);
        assert!(store.contains(1).await);
    }

    #[tokio::test]
    async fn test_concurrent_mutations_do_not_lose_writes() {
        let (store, _) = memory_store();

        tokio::join!(
            async { store.add(1).await.unwrap() },
            async { store.add(2).await.unwrap() },
            async { store.add(3).await.unwrap() },
        );

        assert_eq!(store.get_all().await.len(), 3);
    }

    #[tokio::test]
    async fn test_sqlite_backed_store() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = db.favorites("custom-key");
        assert_eq!(store.key(), "custom-key");

        assert!(store.toggle(8).await.unwrap());
        assert!(db.favorites("custom-key").contains(8).await);
        assert!(!db.favorites(DEFAULT_FAVORITES_KEY).contains(8).await);
    }
}
