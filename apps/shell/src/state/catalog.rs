//! # Catalog State
//!
//! The two loaders the UI observes: the listing (products + categories) and
//! the product detail page. Both share one catalog handle, so with a
//! [`explorer_catalog::CachedCatalog`] underneath they share one cache.

use explorer_catalog::{CatalogApi, CatalogLoader, DetailLoader};
use std::sync::atomic::{AtomicBool, Ordering};

/// Listing and detail loaders over the same catalog.
#[derive(Debug)]
pub struct CatalogState<C> {
    listing: CatalogLoader<C>,
    detail: DetailLoader<C>,
    // Set when the last detail route did not name a valid product id.
    route_rejected: AtomicBool,
}

impl<C: CatalogApi + Clone> CatalogState<C> {
    pub fn new(api: C) -> Self {
        CatalogState {
            listing: CatalogLoader::new(api.clone()),
            detail: DetailLoader::new(api),
            route_rejected: AtomicBool::new(false),
        }
    }
}

impl<C: CatalogApi> CatalogState<C> {
    pub fn listing(&self) -> &CatalogLoader<C> {
        &self.listing
    }

    pub fn detail(&self) -> &DetailLoader<C> {
        &self.detail
    }

    /// Records whether the current detail route was rejected before loading.
    pub fn set_route_rejected(&self, rejected: bool) {
        self.route_rejected.store(rejected, Ordering::SeqCst);
    }

    pub fn route_rejected(&self) -> bool {
        self.route_rejected.load(Ordering::SeqCst)
    }
}
