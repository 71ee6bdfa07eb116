//! # Product Detail Commands
//!
//! The detail page is addressed by a route parameter. The parameter is
//! validated before anything is fetched; a malformed id shows the same
//! "not found" page as a failed fetch.

use explorer_catalog::{CatalogApi, LoadState};
use explorer_core::{parse_product_id, Product};
use explorer_db::KeyValueStore;
use serde::Serialize;
use ts_rs::TS;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::{CatalogState, FavoritesState};

const NOT_FOUND_TITLE: &str = "Product not found";
const NOT_FOUND_MESSAGE: &str = "The product you are looking for does not exist.";

/// What the detail page should show.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "status", rename_all = "camelCase")]
#[ts(export)]
pub enum DetailView {
    Loading,
    /// Offered with a retry action.
    NotFound {
        title: String,
        message: String,
    },
    Ready {
        product: Product,
        #[serde(rename = "isFavorite")]
        is_favorite: bool,
    },
}

impl DetailView {
    fn not_found(message: Option<String>) -> Self {
        DetailView::NotFound {
            title: NOT_FOUND_TITLE.to_string(),
            message: message.unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string()),
        }
    }
}

/// Opens the detail page for the raw route parameter `id_param`.
pub async fn open_product<C: CatalogApi, S: KeyValueStore>(
    catalog: &CatalogState<C>,
    favorites: &FavoritesState<S>,
    id_param: &str,
) -> DetailView {
    debug!(id = %id_param, "open_product command");

    match parse_product_id(id_param) {
        Ok(id) => {
            catalog.set_route_rejected(false);
            catalog.detail().load(id).await;
        }
        Err(err) => {
            warn!(id = %id_param, error = %err, "Rejected product route");
            catalog.set_route_rejected(true);
        }
    }

    product_view(catalog, favorites)
}

/// Fetches the current product again after a failure.
pub async fn retry_product<C: CatalogApi, S: KeyValueStore>(
    catalog: &CatalogState<C>,
    favorites: &FavoritesState<S>,
) -> Result<DetailView, ApiError> {
    debug!("retry_product command");

    if !catalog.route_rejected() {
        catalog.detail().retry().await?;
    }
    Ok(product_view(catalog, favorites))
}

/// Builds the detail view from the current state.
pub fn product_view<C: CatalogApi, S: KeyValueStore>(
    catalog: &CatalogState<C>,
    favorites: &FavoritesState<S>,
) -> DetailView {
    if catalog.route_rejected() {
        return DetailView::not_found(None);
    }
    if !favorites.is_loaded() {
        return DetailView::Loading;
    }

    match catalog.detail().state() {
        LoadState::Idle | LoadState::Loading => DetailView::Loading,
        LoadState::Failed { message } => DetailView::not_found(Some(message)),
        LoadState::Ready(product) => DetailView::Ready {
            is_favorite: favorites.contains(product.id),
            product,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::FakeCatalog;
    use crate::error::ErrorCode;
    use explorer_db::{FavoritesStore, MemoryKeyValueStore};
    use std::sync::Arc;

    async fn setup() -> (
        Arc<FakeCatalog>,
        CatalogState<Arc<FakeCatalog>>,
        FavoritesState<MemoryKeyValueStore>,
    ) {
        let api = Arc::new(FakeCatalog::with_products());
        let catalog = CatalogState::new(api.clone());
        let favorites = FavoritesState::new(FavoritesStore::new(MemoryKeyValueStore::new()));
        favorites.load().await;
        (api, catalog, favorites)
    }

    #[tokio::test]
    async fn test_open_product_ready() {
        let (_api, catalog, favorites) = setup().await;
        favorites.toggle(3).await.unwrap();

        match open_product(&catalog, &favorites, "3").await {
            DetailView::Ready {
                product,
                is_favorite,
            } => {
                assert_eq!(product.title, "Gold Ring");
                assert!(is_favorite);
            }
            other => panic!("expected ready, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_param_is_not_fetched() {
        let (_api, catalog, favorites) = setup().await;

        let view = open_product(&catalog, &favorites, "abc").await;

        assert_eq!(
            view,
            DetailView::NotFound {
                title: "Product not found".to_string(),
                message: "The product you are looking for does not exist.".to_string(),
            }
        );
        assert_eq!(catalog.detail().current_id(), None);
        assert_eq!(retry_product(&catalog, &favorites).await.unwrap(), view);
    }

    #[tokio::test]
    async fn test_fetch_failure_then_retry() {
        let (api, catalog, favorites) = setup().await;
        api.set_products_down(true);

        let view = open_product(&catalog, &favorites, "1").await;
        assert_eq!(
            view,
            DetailView::NotFound {
                title: "Product not found".to_string(),
                message: "Failed to fetch product".to_string(),
            }
        );

        api.set_products_down(false);
        let view = retry_product(&catalog, &favorites).await.unwrap();
        assert!(matches!(view, DetailView::Ready { .. }));

        let err = retry_product(&catalog, &favorites).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
    }

    #[tokio::test]
    async fn test_valid_route_clears_rejection() {
        let (_api, catalog, favorites) = setup().await;
        open_product(&catalog, &favorites, "0").await;
        assert!(catalog.route_rejected());

        let view = open_product(&catalog, &favorites, " 2 ").await;
        assert!(!catalog.route_rejected());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["isFavorite"], false);
        assert_eq!(json["product"]["price"], 5.0);
    }
}
