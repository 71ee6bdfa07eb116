//! # Favorites State
//!
//! The favorites store plus the session's copy of the favorite set.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  start() ──► load() ──► store.get_all() ──► session set, loaded = true │
//! │                                                                         │
//! │  Heart click ──► toggle(id) ──► store.toggle(id)   (persists)          │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                          store.get_all() ──► session set               │
//! │                                                                         │
//! │  listing() / product_view() read the session set only.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use explorer_core::{FavoriteSet, ProductId};
use explorer_db::{DbResult, FavoritesStore, KeyValueStore};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct Session {
    favorites: FavoriteSet,
    loaded: bool,
}

/// Persistent favorites and their in-memory session copy.
#[derive(Debug)]
pub struct FavoritesState<S> {
    store: FavoritesStore<S>,
    session: Mutex<Session>,
}

impl<S: KeyValueStore> FavoritesState<S> {
    pub fn new(store: FavoritesStore<S>) -> Self {
        FavoritesState {
            store,
            session: Mutex::new(Session::default()),
        }
    }

    /// Reads the persisted set into the session. Never fails.
    pub async fn load(&self) -> FavoriteSet {
        let favorites = self.store.get_all().await;
        debug!(count = favorites.len(), "Favorites loaded");

        let mut session = self.session();
        session.favorites = favorites.clone();
        session.loaded = true;
        favorites
    }

    /// True once [`load`](Self::load) has completed.
    pub fn is_loaded(&self) -> bool {
        self.session().loaded
    }

    /// Copy of the session set.
    pub fn snapshot(&self) -> FavoriteSet {
        self.session().favorites.clone()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.session().favorites.contains(id)
    }

    /// Toggles `id` in storage, then refreshes the session from storage.
    pub async fn toggle(&self, id: ProductId) -> DbResult<bool> {
        let now_favorite = self.store.toggle(id).await?;
        self.load().await;
        Ok(now_favorite)
    }
}

impl<S> FavoritesState<S> {
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_db::MemoryKeyValueStore;

    #[tokio::test]
    async fn test_load_and_toggle() {
        let backend = MemoryKeyValueStore::new();
        backend.set("product-favorites", "[4]").await.unwrap();
        let state = FavoritesState::new(FavoritesStore::new(backend));

        assert!(!state.is_loaded());
        state.load().await;
        assert!(state.is_loaded());
        assert!(state.contains(4));

        assert!(state.toggle(9).await.unwrap());
        assert_eq!(state.snapshot().as_slice(), &[4, 9]);

        assert!(!state.toggle(4).await.unwrap());
        assert!(!state.contains(4));
    }

    #[tokio::test]
    async fn test_failed_toggle_keeps_session() {
        let backend = MemoryKeyValueStore::new();
        let state = FavoritesState::new(FavoritesStore::new(backend.clone()));
        state.toggle(1).await.unwrap();

        backend.set_unavailable(true);
        assert!(state.toggle(2).await.is_err());

        assert_eq!(state.snapshot().as_slice(), &[1]);
    }
}
