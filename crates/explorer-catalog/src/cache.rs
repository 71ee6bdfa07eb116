//! # Response Cache
//!
//! Serves successful catalog responses for a bounded interval before going
//! back to the network.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  list_products() ──► fresh entry? ──yes──► clone of cached Vec         │
//! │                           │                                             │
//! │                           no                                            │
//! │                           ▼                                             │
//! │                   inner.list_products()                                │
//! │                     │            │                                      │
//! │                    Ok           Err ──► returned as-is, NOT cached     │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │           store (value, fetched_at) ──► return                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use explorer_core::{Product, ProductId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

use crate::client::CatalogApi;
use crate::error::FetchResult;

#[derive(Debug, Clone)]
struct Cached<T> {
    value: T,
    fetched_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Entries {
    products: Option<Cached<Vec<Product>>>,
    categories: Option<Cached<Vec<String>>>,
    product: HashMap<ProductId, Cached<Product>>,
}

/// A [`CatalogApi`] that remembers successful answers for `ttl`.
///
/// With `ttl = None` every call goes straight to the inner catalog.
#[derive(Debug)]
pub struct CachedCatalog<C> {
    inner: C,
    ttl: Option<chrono::Duration>,
    entries: Mutex<Entries>,
}

impl<C: CatalogApi> CachedCatalog<C> {
    pub fn new(inner: C, ttl: Option<Duration>) -> Self {
        let ttl = ttl.map(|ttl| chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX));
        CachedCatalog {
            inner,
            ttl,
            entries: Mutex::new(Entries::default()),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Drops every cached response.
    pub fn invalidate(&self) {
        *self.entries() = Entries::default();
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn fresh<T: Clone>(&self, cached: Option<&Cached<T>>) -> Option<T> {
        let ttl = self.ttl?;
        let cached = cached?;
        (Utc::now() - cached.fetched_at < ttl).then(|| cached.value.clone())
    }

    fn stamp<T>(value: T) -> Cached<T> {
        Cached {
            value,
            fetched_at: Utc::now(),
        }
    }

    fn enabled(&self) -> bool {
        self.ttl.is_some()
    }
}

impl<C: CatalogApi> CatalogApi for CachedCatalog<C> {
    async fn list_products(&self) -> FetchResult<Vec<Product>> {
        let cached = self.fresh(self.entries().products.as_ref());
        if let Some(products) = cached {
            debug!("Serving products from cache");
            return Ok(products);
        }

        let products = self.inner.list_products().await?;
        if self.enabled() {
            self.entries().products = Some(Self::stamp(products.clone()));
        }
        Ok(products)
    }

    async fn get_product(&self, id: ProductId) -> FetchResult<Product> {
        let cached = self.fresh(self.entries().product.get(&id));
        if let Some(product) = cached {
            debug!(id, "Serving product from cache");
            return Ok(product);
        }

        let product = self.inner.get_product(id).await?;
        if self.enabled() {
            self.entries()
                .product
                .insert(id, Self::stamp(product.clone()));
        }
        Ok(product)
    }

    async fn list_categories(&self) -> FetchResult<Vec<String>> {
        let cached = self.fresh(self.entries().categories.as_ref());
        if let Some(categories) = cached {
            debug!("Serving categories from cache");
            return Ok(categories);
        }

        let categories = self.inner.list_categories().await?;
        if self.enabled() {
            self.entries().categories = Some(Self::stamp(categories.clone()));
        }
        Ok(categories)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
