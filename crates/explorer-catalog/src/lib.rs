//! # explorer-catalog: Remote Catalog Access for the Product Explorer
//!
//! Everything that talks to the catalog service, and the state machine that
//! turns those calls into something a UI can render.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CatalogLoader / DetailLoader   (lifecycle.rs)                         │
//! │       │  Idle → Loading → Ready | Failed, observable via watch         │
//! │       ▼                                                                 │
//! │  CachedCatalog<C>               (cache.rs, revalidate_secs)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  HttpCatalogClient              (client.rs, reqwest)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  https://fakestoreapi.com/products[/{id} | /categories]                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`client`] - [`CatalogApi`] trait and the HTTP implementation
//! - [`cache`] - Response cache with a revalidation interval
//! - [`lifecycle`] - Load state machine and loaders
//! - [`config`] - [`CatalogConfig`]
//! - [`error`] - [`FetchError`], [`LifecycleError`], [`ConfigError`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use explorer_catalog::{CachedCatalog, CatalogConfig, CatalogLoader, HttpCatalogClient};
//!
//! let config = CatalogConfig::default();
//! let client = HttpCatalogClient::new(&config)?;
//! let loader = CatalogLoader::new(CachedCatalog::new(client, config.revalidate()));
//!
//! match loader.load().await {
//!     LoadState::Ready(snapshot) => println!("{} products", snapshot.products.len()),
//!     LoadState::Failed { message } => println!("{message}"),
//!     _ => {}
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod lifecycle;

pub use cache::CachedCatalog;
pub use client::{CatalogApi, HttpCatalogClient};
pub use config::{CatalogConfig, DEFAULT_BASE_URL};
pub use error::{ConfigError, FetchError, FetchResult, LifecycleError, Resource};
pub use lifecycle::{CatalogLoader, CatalogSnapshot, DetailLoader, LoadState, Lifecycle};
