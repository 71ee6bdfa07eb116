//! # Entry Points Module
//!
//! Every discrete user intent the presentation layer can trigger.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── catalog.rs    ◄─── start, retry, reload, categories
//! ├── filters.rs    ◄─── search, category, favorites-only, sort, reset
//! ├── favorites.rs  ◄─── toggle_favorite, favorite ids
//! ├── listing.rs    ◄─── ListingView for the product grid
//! └── detail.rs     ◄─── open_product, retry_product, DetailView
//! ```
//!
//! ## How Entry Points Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Entry Point Flow                                     │
//! │                                                                         │
//! │  Presentation                                                          │
//! │  ────────────                                                          │
//! │  explorer.set_search_query("shirt")                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::filters::set_search_query(                                  │
//! │      filters: &FilterState,   ◄── only the state it needs              │
//! │      query: &str,                                                      │
//! │  ) -> FilterOptions                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  explorer.listing()  ──► ListingView (serde + ts-rs bindings)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Views are recomputed from state on every call; nothing is cached here.

pub mod catalog;
pub mod detail;
pub mod favorites;
pub mod filters;
pub mod listing;
