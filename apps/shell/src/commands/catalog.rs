//! # Catalog Commands
//!
//! Startup, retry and reload of the product listing.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────┐  start   ┌─────────┐  both ok   ┌───────┐                    │
//! │  │ Idle │────────► │ Loading │──────────► │ Ready │                    │
//! │  └──────┘          └─────────┘            └───────┘                    │
//! │                      ▲    │ either failed     │                         │
//! │               retry  │    ▼                   │ reload                  │
//! │                    ┌────────┐                 │                         │
//! │                    │ Failed │ ◄───────────────┘ (if the reload fails)   │
//! │                    └────────┘                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fetch failures never come back as `Err`: they land in the `Failed`
//! state and show up in the listing. `Err` means the action itself was
//! not allowed.

use chrono::{DateTime, Utc};
use explorer_catalog::{CatalogApi, CatalogSnapshot, LoadState};
use explorer_db::KeyValueStore;
use serde::Serialize;
use ts_rs::TS;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{CatalogState, FavoritesState};

/// Where the listing load stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogStatus {
    /// `idle`, `loading`, `ready` or `failed`.
    pub state: String,
    pub error: Option<String>,
    #[ts(type = "string | null")]
    pub loaded_at: Option<DateTime<Utc>>,
}

impl From<&LoadState<CatalogSnapshot>> for CatalogStatus {
    fn from(state: &LoadState<CatalogSnapshot>) -> Self {
        CatalogStatus {
            state: state.name().to_string(),
            error: state.error().map(str::to_string),
            loaded_at: state.data().map(|snapshot| snapshot.loaded_at),
        }
    }
}

/// Loads the persisted favorites, then the catalog.
pub async fn start<C: CatalogApi, S: KeyValueStore>(
    catalog: &CatalogState<C>,
    favorites: &FavoritesState<S>,
) -> CatalogStatus {
    info!("Starting product explorer");
    favorites.load().await;
    let state = catalog.listing().load().await;
    CatalogStatus::from(&state)
}

/// Loads again after a failure.
pub async fn retry<C: CatalogApi>(catalog: &CatalogState<C>) -> Result<CatalogStatus, ApiError> {
    debug!("retry command");
    let state = catalog.listing().retry().await?;
    Ok(CatalogStatus::from(&state))
}

/// Loads again, discarding the current data.
pub async fn reload<C: CatalogApi>(catalog: &CatalogState<C>) -> Result<CatalogStatus, ApiError> {
    debug!("reload command");
    let state = catalog.listing().reload().await?;
    Ok(CatalogStatus::from(&state))
}

/// Current load status without triggering anything.
pub fn status<C: CatalogApi>(catalog: &CatalogState<C>) -> CatalogStatus {
    CatalogStatus::from(&catalog.listing().state())
}

/// Category names for the category picker; empty until the catalog is ready.
pub fn categories<C: CatalogApi>(catalog: &CatalogState<C>) -> Vec<String> {
    match catalog.listing().state() {
        LoadState::Ready(snapshot) => snapshot.categories,
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::FakeCatalog;
    use crate::error::ErrorCode;
    use explorer_db::{FavoritesStore, MemoryKeyValueStore};
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    fn favorites() -> FavoritesState<MemoryKeyValueStore> {
        FavoritesState::new(FavoritesStore::new(MemoryKeyValueStore::new()))
    }

    #[tokio::test]
    async fn test_start_loads_favorites_and_catalog() {
        let catalog = CatalogState::new(Arc::new(FakeCatalog::with_products()));
        let favorites = favorites();

        let status = start(&catalog, &favorites).await;

        assert_eq!(status.state, "ready");
        assert!(status.error.is_none());
        assert!(status.loaded_at.is_some());
        assert!(favorites.is_loaded());
        assert_eq!(categories(&catalog), vec!["clothing", "jewelery"]);
    }

    #[tokio::test]
    async fn test_partial_failure_then_retry() {
        let api = Arc::new(FakeCatalog::with_products());
        api.categories_down.store(true, Ordering::SeqCst);
        let catalog = CatalogState::new(api.clone());

        let status = start(&catalog, &favorites()).await;
        assert_eq!(status.state, "failed");
        assert_eq!(status.error.as_deref(), Some("Failed to fetch categories"));
        assert!(categories(&catalog).is_empty());

        api.categories_down.store(false, Ordering::SeqCst);
        let status = retry(&catalog).await.unwrap();
        assert_eq!(status.state, "ready");
    }

    #[tokio::test]
    async fn test_retry_rejected_unless_failed() {
        let catalog = CatalogState::new(Arc::new(FakeCatalog::with_products()));

        let err = retry(&catalog).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);

        start(&catalog, &favorites()).await;
        assert_eq!(retry(&catalog).await.unwrap_err().message, "Cannot retry while ready");
    }

    #[tokio::test]
    async fn test_reload_failure_drops_previous_data() {
        let api = Arc::new(FakeCatalog::with_products());
        let catalog = CatalogState::new(api.clone());
        start(&catalog, &favorites()).await;

        api.set_products_down(true);
        let status = reload(&catalog).await.unwrap();

        assert_eq!(status.state, "failed");
        assert!(status.loaded_at.is_none());
        assert!(categories(&catalog).is_empty());
        assert_eq!(status, super::status(&catalog));
    }
}
