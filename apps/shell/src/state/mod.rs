//! # State Module
//!
//! The explorer's session state, split into focused types so each entry
//! point only touches what it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │  CatalogState    │ │  FavoritesState  │ │    FilterState       │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  • CatalogLoader │ │  • FavoritesStore│ │  • FilterOptions     │   │
//! │  │  • DetailLoader  │ │  • session set   │ │    (transient)       │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  ShellConfig: read-only after startup                                  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: watch channels inside the loaders                     │
//! │  • FavoritesState: store serializes writes, session set under Mutex    │
//! │  • FilterState: Mutex<FilterOptions>                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod favorites;
mod filters;

pub use catalog::CatalogState;
pub use config::{LoggingSettings, SettingsError, SettingsResult, ShellConfig, StorageSettings};
pub use favorites::FavoritesState;
pub use filters::FilterState;
