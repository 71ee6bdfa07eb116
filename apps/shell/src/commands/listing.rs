//! # Listing View
//!
//! The product grid, computed from the catalog load state, the session's
//! favorites and the current filters.
//!
//! ## View Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  favorites not loaded, or catalog Idle/Loading ──► Loading             │
//! │                                                                         │
//! │  catalog Failed { message } ─────────────────────► Failed              │
//! │                                                                         │
//! │  catalog Ready ──► filter_products(...)                                │
//! │                        │                                                │
//! │                 empty? ├── yes, favorites only ──► Empty(NoFavorites)  │
//! │                        ├── yes ──────────────────► Empty(NoResults)    │
//! │                        └── no ───────────────────► Products            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use explorer_catalog::{CatalogApi, LoadState};
use explorer_core::{filter_products, FilterOptions, Product};
use explorer_db::KeyValueStore;
use serde::Serialize;
use ts_rs::TS;
use tracing::debug;

use crate::state::{CatalogState, FavoritesState, FilterState};

/// One card in the product grid.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductCard {
    pub product: Product,
    pub is_favorite: bool,
}

/// Numbers shown next to the filter controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ListingCounts {
    /// Size of the favorite set.
    pub favorites: usize,
    /// Products in the catalog.
    pub total: usize,
    /// Products left after filtering.
    pub filtered: usize,
}

/// Why the grid is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[ts(export)]
pub enum EmptyReason {
    /// Favorites-only is on and nothing survives it.
    NoFavorites,
    /// Search or category left nothing.
    NoResults {
        #[serde(rename = "searchQuery")]
        search_query: Option<String>,
    },
}

impl EmptyReason {
    fn for_filters(filters: &FilterOptions) -> Self {
        if filters.show_favorites_only {
            return EmptyReason::NoFavorites;
        }
        let query = &filters.search_query;
        EmptyReason::NoResults {
            search_query: (!query.is_empty()).then(|| query.clone()),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EmptyReason::NoFavorites => "No favorites yet",
            EmptyReason::NoResults { .. } => "No products found",
        }
    }

    pub fn message(&self) -> String {
        match self {
            EmptyReason::NoFavorites => "Start adding products to your favorites by clicking \
                 the heart icon on any product."
                .to_string(),
            EmptyReason::NoResults {
                search_query: Some(query),
            } => format!(
                "No products match \"{}\". Try a different search term or filter.",
                query
            ),
            EmptyReason::NoResults { search_query: None } => {
                "No products match your current filters. Try adjusting your filters.".to_string()
            }
        }
    }
}

/// What the product grid should show.
///
/// ## Serialization
/// ```json
/// { "status": "empty",
///   "reason": { "kind": "noFavorites" },
///   "title": "No favorites yet",
///   "message": "Start adding products ...",
///   "counts": { "favorites": 0, "total": 20, "filtered": 0 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "status", rename_all = "camelCase")]
#[ts(export)]
pub enum ListingView {
    Loading,
    Failed {
        message: String,
    },
    Empty {
        reason: EmptyReason,
        title: String,
        message: String,
        counts: ListingCounts,
    },
    Products {
        items: Vec<ProductCard>,
        counts: ListingCounts,
    },
}

impl ListingView {
    /// Returns true when a retry affordance should be offered.
    pub fn is_failed(&self) -> bool {
        matches!(self, ListingView::Failed { .. })
    }
}

/// Builds the listing view from the current state.
pub fn listing<C: CatalogApi, S: KeyValueStore>(
    catalog: &CatalogState<C>,
    favorites: &FavoritesState<S>,
    filters: &FilterState,
) -> ListingView {
    if !favorites.is_loaded() {
        return ListingView::Loading;
    }

    let snapshot = match catalog.listing().state() {
        LoadState::Idle | LoadState::Loading => return ListingView::Loading,
        LoadState::Failed { message } => return ListingView::Failed { message },
        LoadState::Ready(snapshot) => snapshot,
    };

    let filters = filters.get();
    let favorite_set = favorites.snapshot();
    let visible = filter_products(&snapshot.products, &filters, &favorite_set);

    let counts = ListingCounts {
        favorites: favorite_set.len(),
        total: snapshot.products.len(),
        filtered: visible.len(),
    };
    debug!(total = counts.total, filtered = counts.filtered, "Listing computed");

    if visible.is_empty() {
        let reason = EmptyReason::for_filters(&filters);
        return ListingView::Empty {
            title: reason.title().to_string(),
            message: reason.message(),
            reason,
            counts,
        };
    }

    let items = visible
        .into_iter()
        .map(|product| ProductCard {
            is_favorite: favorite_set.contains(product.id),
            product,
        })
        .collect();

    ListingView::Products { items, counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::FakeCatalog;
    use explorer_core::SortOption;
    use explorer_db::{FavoritesStore, MemoryKeyValueStore};
    use std::sync::Arc;

    struct Fixture {
        catalog: CatalogState<Arc<FakeCatalog>>,
        favorites: FavoritesState<MemoryKeyValueStore>,
        filters: FilterState,
    }

    impl Fixture {
        fn new(api: FakeCatalog) -> Self {
            Fixture {
                catalog: CatalogState::new(Arc::new(api)),
                favorites: FavoritesState::new(FavoritesStore::new(MemoryKeyValueStore::new())),
                filters: FilterState::new(),
            }
        }

        async fn loaded(api: FakeCatalog) -> Self {
            let fixture = Fixture::new(api);
            fixture.favorites.load().await;
            fixture.catalog.listing().load().await;
            fixture
        }

        fn view(&self) -> ListingView {
            listing(&self.catalog, &self.favorites, &self.filters)
        }
    }

    fn titles(view: &ListingView) -> Vec<&str> {
        match view {
            ListingView::Products { items, .. } => {
                items.iter().map(|item| item.product.title.as_str()).collect()
            }
            other => panic!("expected products, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_loading_until_favorites_and_catalog_are_ready() {
        let fixture = Fixture::new(FakeCatalog::with_products());
        assert_eq!(fixture.view(), ListingView::Loading);

        fixture.catalog.listing().load().await;
        assert_eq!(fixture.view(), ListingView::Loading);

        fixture.favorites.load().await;
        assert_eq!(titles(&fixture.view()), vec!["Red Shirt", "Blue Hat", "Gold Ring"]);
    }

    #[tokio::test]
    async fn test_failed_catalog() {
        let api = FakeCatalog::with_products();
        api.set_products_down(true);
        let fixture = Fixture::loaded(api).await;

        let view = fixture.view();
        assert!(view.is_failed());
        assert_eq!(
            view,
            ListingView::Failed {
                message: "Failed to fetch products".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_products_carry_favorite_flag_and_counts() {
        let fixture = Fixture::loaded(FakeCatalog::with_products()).await;
        fixture.favorites.toggle(2).await.unwrap();
        fixture.filters.update(|f| f.sort_by = SortOption::PriceAsc);

        match fixture.view() {
            ListingView::Products { items, counts } => {
                assert_eq!(items[0].product.title, "Blue Hat");
                assert!(items[0].is_favorite);
                assert!(!items[1].is_favorite);
                assert_eq!(
                    counts,
                    ListingCounts {
                        favorites: 1,
                        total: 3,
                        filtered: 3
                    }
                );
            }
            other => panic!("expected products, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_favorites_only() {
        let fixture = Fixture::loaded(FakeCatalog::with_products()).await;
        fixture.filters.update(|f| f.show_favorites_only = true);

        match fixture.view() {
            ListingView::Empty { reason, title, .. } => {
                assert_eq!(reason, EmptyReason::NoFavorites);
                assert_eq!(title, "No favorites yet");
            }
            other => panic!("expected empty, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_search_mentions_query() {
        let fixture = Fixture::loaded(FakeCatalog::with_products()).await;
        fixture.filters.update(|f| f.search_query = "laptop".to_string());

        match fixture.view() {
            ListingView::Empty { message, counts, .. } => {
                assert_eq!(
                    message,
                    "No products match \"laptop\". Try a different search term or filter."
                );
                assert_eq!(counts.filtered, 0);
                assert_eq!(counts.total, 3);
            }
            other => panic!("expected empty, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_search_keeps_query_as_typed() {
        let fixture = Fixture::loaded(FakeCatalog::with_products()).await;
        fixture.filters.update(|f| f.search_query = "  ".to_string());

        match fixture.view() {
            ListingView::Empty { reason, message, .. } => {
                assert_eq!(
                    reason,
                    EmptyReason::NoResults {
                        search_query: Some("  ".to_string())
                    }
                );
                assert_eq!(
                    message,
                    "No products match \"  \". Try a different search term or filter."
                );
            }
            other => panic!("expected empty, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_category_without_query() {
        let fixture = Fixture::loaded(FakeCatalog::with_products()).await;
        fixture
            .filters
            .update(|f| f.selected_category = "electronics".to_string());

        let view = fixture.view();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "empty");
        assert_eq!(json["reason"]["kind"], "noResults");
        assert!(json["reason"]["searchQuery"].is_null());
        assert_eq!(
            json["message"],
            "No products match your current filters. Try adjusting your filters."
        );
    }

    #[tokio::test]
    async fn test_search_scenario() {
        let fixture = Fixture::loaded(FakeCatalog::with_products()).await;
        fixture.filters.update(|f| f.search_query = "red".to_string());

        assert_eq!(titles(&fixture.view()), vec!["Red Shirt"]);
    }
}
