//! # Product Explorer Shell
//!
//! The entry points a presentation layer calls. [`Explorer`] wires the
//! catalog, the favorites store and the filters together; each method is one
//! user intent and returns a serializable view.
//!
//! ## Module Organization
//! ```text
//! explorer_shell/
//! ├── lib.rs          ◄─── You are here (Explorer façade, tracing setup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Listing and detail loaders
//! │   ├── favorites.rs◄─── Favorites store + session set
//! │   ├── filters.rs  ◄─── Current FilterOptions
//! │   └── config.rs   ◄─── ShellConfig (TOML)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Entry point exports
//! │   ├── catalog.rs  ◄─── start / retry / reload / categories
//! │   ├── filters.rs  ◄─── Filter controls
//! │   ├── favorites.rs◄─── toggle_favorite
//! │   ├── listing.rs  ◄─── ListingView
//! │   └── detail.rs   ◄─── DetailView
//! └── error.rs        ◄─── ApiError for rejected calls
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Explorer Startup                                  │
//! │                                                                         │
//! │  1. ShellConfig::load_or_default(None) ───────────────────────────────► │
//! │     • explorer.toml in the platform config dir, or defaults             │
//! │                                                                         │
//! │  2. init_tracing(&config.logging) ────────────────────────────────────► │
//! │     • tracing-subscriber with the configured EnvFilter                  │
//! │                                                                         │
//! │  3. Explorer::open(&config) ──────────────────────────────────────────► │
//! │     • HTTP client + response cache                                      │
//! │     • SQLite (WAL, migrations) for favorites                            │
//! │                                                                         │
//! │  4. explorer.start() ─────────────────────────────────────────────────► │
//! │     • favorites, then products + categories                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use explorer_catalog::{CachedCatalog, CatalogApi, HttpCatalogClient};
use explorer_core::{FilterOptions, ProductId, SortOption};
use explorer_db::{Database, DbConfig, FavoritesStore, KeyValueStore, SqliteKeyValueStore};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::catalog::CatalogStatus;
use commands::detail::DetailView;
use commands::favorites::FavoriteToggle;
use commands::listing::ListingView;
use error::{ApiError, ErrorCode};
use state::{CatalogState, FavoritesState, FilterState, LoggingSettings, ShellConfig};

/// Installs the global tracing subscriber.
///
/// Does nothing (beyond a debug line) when the host already installed one.
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), ApiError> {
    let filter = EnvFilter::try_new(&settings.filter).map_err(|e| {
        ApiError::new(ErrorCode::ConfigError, format!("Invalid log filter: {}", e))
    })?;

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        debug!("Tracing subscriber already installed");
    }
    Ok(())
}

/// The catalog used in production: HTTP with a response cache.
pub type LiveCatalog = Arc<CachedCatalog<HttpCatalogClient>>;

/// The session: catalog loaders, favorites and filters.
#[derive(Debug)]
pub struct Explorer<C, S> {
    catalog: CatalogState<C>,
    favorites: FavoritesState<S>,
    filters: FilterState,
}

impl Explorer<LiveCatalog, SqliteKeyValueStore> {
    /// Builds the production explorer from configuration.
    pub async fn open(config: &ShellConfig) -> Result<Self, ApiError> {
        config.validate()?;

        let client = HttpCatalogClient::new(&config.catalog)?;
        info!(base_url = %client.base_url(), "Catalog client ready");
        let api = Arc::new(CachedCatalog::new(client, config.catalog.revalidate()));

        let db_path = config.database_path()?;
        info!(?db_path, "Opening favorites database");
        let db = Database::new(DbConfig::new(db_path)).await?;

        Ok(Explorer::new(api, db.favorites(config.storage.favorites_key.clone())))
    }
}

impl<C: CatalogApi + Clone, S: KeyValueStore> Explorer<C, S> {
    pub fn new(api: C, store: FavoritesStore<S>) -> Self {
        Explorer {
            catalog: CatalogState::new(api),
            favorites: FavoritesState::new(store),
            filters: FilterState::new(),
        }
    }
}

impl<C: CatalogApi, S: KeyValueStore> Explorer<C, S> {
    pub fn catalog(&self) -> &CatalogState<C> {
        &self.catalog
    }

    pub fn favorites(&self) -> &FavoritesState<S> {
        &self.favorites
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub async fn start(&self) -> CatalogStatus {
        commands::catalog::start(&self.catalog, &self.favorites).await
    }

    pub async fn retry(&self) -> Result<CatalogStatus, ApiError> {
        commands::catalog::retry(&self.catalog).await
    }

    pub async fn reload(&self) -> Result<CatalogStatus, ApiError> {
        commands::catalog::reload(&self.catalog).await
    }

    pub fn status(&self) -> CatalogStatus {
        commands::catalog::status(&self.catalog)
    }

    pub fn categories(&self) -> Vec<String> {
        commands::catalog::categories(&self.catalog)
    }

    // =========================================================================
    // Filters
    // =========================================================================

    pub fn filters(&self) -> FilterOptions {
        self.filters.get()
    }

    pub fn set_search_query(&self, query: &str) -> FilterOptions {
        commands::filters::set_search_query(&self.filters, query)
    }

    pub fn select_category(&self, category: &str) -> FilterOptions {
        commands::filters::select_category(&self.filters, category)
    }

    pub fn toggle_favorites_only(&self) -> FilterOptions {
        commands::filters::toggle_favorites_only(&self.filters)
    }

    pub fn set_sort(&self, sort_by: SortOption) -> FilterOptions {
        commands::filters::set_sort(&self.filters, sort_by)
    }

    pub fn set_sort_by_name(&self, name: &str) -> Result<FilterOptions, ApiError> {
        commands::filters::set_sort_by_name(&self.filters, name)
    }

    pub fn reset_filters(&self) -> FilterOptions {
        commands::filters::reset_filters(&self.filters)
    }

    // =========================================================================
    // Favorites and views
    // =========================================================================

    pub async fn toggle_favorite(&self, product_id: ProductId) -> Result<FavoriteToggle, ApiError> {
        commands::favorites::toggle_favorite(&self.favorites, product_id).await
    }

    pub fn favorite_ids(&self) -> Vec<ProductId> {
        commands::favorites::favorite_ids(&self.favorites)
    }

    pub fn listing(&self) -> ListingView {
        commands::listing::listing(&self.catalog, &self.favorites, &self.filters)
    }

    pub async fn open_product(&self, id_param: &str) -> DetailView {
        commands::detail::open_product(&self.catalog, &self.favorites, id_param).await
    }

    pub async fn retry_product(&self) -> Result<DetailView, ApiError> {
        commands::detail::retry_product(&self.catalog, &self.favorites).await
    }

    pub fn product_view(&self) -> DetailView {
        commands::detail::product_view(&self.catalog, &self.favorites)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use commands::listing::EmptyReason;
    use commands::test_support::FakeCatalog;
    use explorer_catalog::CatalogConfig;

    async fn sqlite_explorer() -> Explorer<Arc<FakeCatalog>, SqliteKeyValueStore> {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        Explorer::new(
            Arc::new(FakeCatalog::with_products()),
            db.favorites("product-favorites"),
        )
    }

    fn titles(view: &ListingView) -> Vec<String> {
        match view {
            ListingView::Products { items, .. } => {
                items.iter().map(|item| item.product.title.clone()).collect()
            }
            other => panic!("expected products, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_browse_session() {
        let explorer = sqlite_explorer().await;
        assert_eq!(explorer.listing(), ListingView::Loading);

        let status = explorer.start().await;
        assert_eq!(status.state, "ready");

        explorer.set_sort(SortOption::PriceAsc);
        assert_eq!(
            titles(&explorer.listing()),
            vec!["Blue Hat", "Red Shirt", "Gold Ring"]
        );

        explorer.select_category("clothing");
        explorer.toggle_favorite(2).await.unwrap();
        explorer.toggle_favorites_only();
        assert_eq!(titles(&explorer.listing()), vec!["Blue Hat"]);

        explorer.toggle_favorite(2).await.unwrap();
        match explorer.listing() {
            ListingView::Empty { reason, .. } => assert_eq!(reason, EmptyReason::NoFavorites),
            other => panic!("expected empty, got {:?}", other),
        }

        assert!(explorer.reset_filters().is_identity());
        assert_eq!(
            titles(&explorer.listing()),
            vec!["Red Shirt", "Blue Hat", "Gold Ring"]
        );
    }

    #[tokio::test]
    async fn test_favorites_survive_a_new_session() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let api = Arc::new(FakeCatalog::with_products());

        let first = Explorer::new(api.clone(), db.favorites("product-favorites"));
        first.start().await;
        first.toggle_favorite(3).await.unwrap();
        first.toggle_favorite(1).await.unwrap();

        let second = Explorer::new(api, db.favorites("product-favorites"));
        second.start().await;
        assert_eq!(second.favorite_ids(), vec![3, 1]);
    }

    #[tokio::test]
    async fn test_detail_page() {
        let explorer = sqlite_explorer().await;
        explorer.start().await;
        explorer.toggle_favorite(1).await.unwrap();

        let view = explorer.open_product("1").await;
        assert!(matches!(view, DetailView::Ready { is_favorite: true, .. }));
        assert_eq!(explorer.product_view(), view);
    }

    #[tokio::test]
    async fn test_sort_by_name_rejects_unknown() {
        let explorer = sqlite_explorer().await;
        let err = explorer.set_sort_by_name("random").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(explorer.filters().sort_by, SortOption::Default);
    }

    #[tokio::test]
    async fn test_open_rejects_invalid_config() {
        let mut config = ShellConfig::default();
        config.catalog = CatalogConfig::new("not a url");

        let err = Explorer::open(&config).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_init_tracing_rejects_bad_filter() {
        let settings = LoggingSettings {
            filter: "explorer=loud".to_string(),
        };
        let err = init_tracing(&settings).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);

        assert!(init_tracing(&LoggingSettings::default()).is_ok());
        assert!(init_tracing(&LoggingSettings::default()).is_ok());
    }
}
