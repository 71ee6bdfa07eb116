//! # Load Lifecycle
//!
//! Tracks the loading/error/success state of catalog reads and exposes it as
//! an observable value.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            load()                                                      │
//! │   Idle ─────────────► Loading ──── both Ok ────► Ready(snapshot)       │
//! │                        ▲  │                          │                  │
//! │                        │  └──── any Err ───► Failed{message}           │
//! │                        │                          │  │                  │
//! │                        ├──────── retry() ─────────┘  │                  │
//! │                        └──────── reload() ◄──────────┴── (Ready too)    │
//! │                                                                         │
//! │  Entering Loading drops the previous data and error.                   │
//! │  Each load gets a generation number; a result whose generation is no   │
//! │  longer current is discarded instead of published.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Observers call [`Lifecycle::subscribe`] and get a `tokio::sync::watch`
//! receiver that always holds the latest state.

use chrono::{DateTime, Utc};
use explorer_core::{Product, ProductId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::client::CatalogApi;
use crate::error::{FetchError, LifecycleError};

// =============================================================================
// Load State
// =============================================================================

/// Observable state of one load lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// Nothing requested yet.
    Idle,
    /// A load is in flight; no data and no error are held.
    Loading,
    /// The last load succeeded.
    Ready(T),
    /// The last load failed with a user-facing message.
    Failed { message: String },
}

impl<T> LoadState<T> {
    pub fn name(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Ready(_) => "ready",
            LoadState::Failed { .. } => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Generation-checked holder of a [`LoadState`].
#[derive(Debug)]
pub struct Lifecycle<T> {
    tx: watch::Sender<LoadState<T>>,
    generation: AtomicU64,
}

impl<T: Clone> Lifecycle<T> {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(LoadState::Idle);
        Lifecycle {
            tx,
            generation: AtomicU64::new(0),
        }
    }

    /// A receiver that always sees the latest state.
    pub fn subscribe(&self) -> watch::Receiver<LoadState<T>> {
        self.tx.subscribe()
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> LoadState<T> {
        self.tx.borrow().clone()
    }

    /// Enters Loading unconditionally and returns the new generation.
    pub fn begin(&self) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = LoadState::Loading;
        });
        generation
    }

    /// Enters Loading if `allowed` accepts the current state.
    ///
    /// The check and the transition happen under the channel's write lock,
    /// so two concurrent callers cannot both pass.
    pub fn begin_if(
        &self,
        action: &'static str,
        allowed: impl FnOnce(&LoadState<T>) -> bool,
    ) -> Result<u64, LifecycleError> {
        let mut outcome = Err(LifecycleError::InvalidTransition {
            action,
            state: "idle",
        });

        self.tx.send_if_modified(|state| {
            if !allowed(state) {
                outcome = Err(LifecycleError::InvalidTransition {
                    action,
                    state: state.name(),
                });
                return false;
            }
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = LoadState::Loading;
            outcome = Ok(generation);
            true
        });

        outcome
    }

    /// Publishes the result of load `generation`.
    ///
    /// Returns false (and publishes nothing) if a newer load has started.
    pub fn finish(&self, generation: u64, result: Result<T, String>) -> bool {
        self.tx.send_if_modified(|state| {
            let current = self.generation.load(Ordering::SeqCst);
            if generation != current {
                debug!(generation, current, "Discarding superseded load result");
                return false;
            }
            *state = match result {
                Ok(data) => LoadState::Ready(data),
                Err(message) => LoadState::Failed { message },
            };
            true
        })
    }
}

impl<T: Clone> Default for Lifecycle<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn failure_message(err: &FetchError) -> String {
    error!(error = %err.detail(), "Catalog read failed");
    err.to_string()
}

// =============================================================================
// Catalog Loader
// =============================================================================

/// Products and categories from one successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub loaded_at: DateTime<Utc>,
}

/// Loads the product list and the category list together.
///
/// Both requests are issued concurrently and both must finish before the
/// state leaves Loading. One failure fails the whole load and no partial
/// data is kept.
#[derive(Debug)]
pub struct CatalogLoader<C> {
    api: C,
    state: Lifecycle<CatalogSnapshot>,
}

impl<C: CatalogApi> CatalogLoader<C> {
    pub fn new(api: C) -> Self {
        CatalogLoader {
            api,
            state: Lifecycle::new(),
        }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    pub fn state(&self) -> LoadState<CatalogSnapshot> {
        self.state.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState<CatalogSnapshot>> {
        self.state.subscribe()
    }

    /// Starts a load from any state, superseding one in flight.
    pub async fn load(&self) -> LoadState<CatalogSnapshot> {
        let generation = self.state.begin();
        self.run(generation).await
    }

    /// Loads again after a failure. Rejected in any other state.
    pub async fn retry(&self) -> Result<LoadState<CatalogSnapshot>, LifecycleError> {
        let generation = self
            .state
            .begin_if("retry", |state| matches!(state, LoadState::Failed { .. }))?;
        Ok(self.run(generation).await)
    }

    /// Loads again from any state except Loading.
    pub async fn reload(&self) -> Result<LoadState<CatalogSnapshot>, LifecycleError> {
        let generation = self.state.begin_if("reload", |state| !state.is_loading())?;
        Ok(self.run(generation).await)
    }

    async fn run(&self, generation: u64) -> LoadState<CatalogSnapshot> {
        info!(generation, "Loading catalog");

        let (products, categories) =
            tokio::join!(self.api.list_products(), self.api.list_categories());

        let outcome = match (products, categories) {
            (Ok(products), Ok(categories)) => {
                info!(
                    products = products.len(),
                    categories = categories.len(),
                    "Catalog loaded"
                );
                Ok(CatalogSnapshot {
                    products,
                    categories,
                    loaded_at: Utc::now(),
                })
            }
            (Err(err), _) | (_, Err(err)) => Err(failure_message(&err)),
        };

        self.state.finish(generation, outcome);
        self.state.current()
    }
}

// =============================================================================
// Detail Loader
// =============================================================================

/// Loads one product for the detail page.
#[derive(Debug)]
pub struct DetailLoader<C> {
    api: C,
    state: Lifecycle<Product>,
    last_id: Mutex<Option<ProductId>>,
}

impl<C: CatalogApi> DetailLoader<C> {
    pub fn new(api: C) -> Self {
        DetailLoader {
            api,
            state: Lifecycle::new(),
            last_id: Mutex::new(None),
        }
    }

    pub fn state(&self) -> LoadState<Product> {
        self.state.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState<Product>> {
        self.state.subscribe()
    }

    /// The id of the most recent load, if any.
    pub fn current_id(&self) -> Option<ProductId> {
        *self.last_id.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Loads product `id`, superseding any load in flight.
    pub async fn load(&self, id: ProductId) -> LoadState<Product> {
        *self.last_id.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(id);
        let generation = self.state.begin();
        self.run(generation, id).await
    }

    /// Re-runs the last load after a failure.
    pub async fn retry(&self) -> Result<LoadState<Product>, LifecycleError> {
        let id = self.current_id().ok_or(LifecycleError::InvalidTransition {
            action: "retry",
            state: "idle",
        })?;
        let generation = self
            .state
            .begin_if("retry", |state| matches!(state, LoadState::Failed { .. }))?;
        Ok(self.run(generation, id).await)
    }

    async fn run(&self, generation: u64, id: ProductId) -> LoadState<Product> {
        debug!(generation, id, "Loading product");

        let outcome = self
            .api
            .get_product(id)
            .await
            .map_err(|err| failure_message(&err));

        self.state.finish(generation, outcome);
        self.state.current()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
