//! # explorer-db: Local Persistence for the Product Explorer
//!
//! This crate provides the explorer's local storage: a SQLite database with
//! a tiny key-value table, and the favorites store built on top of it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Favorites Data Flow                                 │
//! │                                                                         │
//! │  Shell entry point (toggle_favorite)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   explorer-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ FavoritesStore │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  get_all       │    │  (embedded)  │  │   │
//! │  │   │               │    │  add / remove  │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  toggle        │    │ 001_kv.sql   │  │   │
//! │  │   └───────────────┘    └───────┬────────┘    └──────────────┘  │   │
//! │  │                                │ KeyValueStore (trait)          │   │
//! │  │                   ┌────────────┴────────────┐                   │   │
//! │  │                   ▼                         ▼                   │   │
//! │  │        SqliteKeyValueStore        MemoryKeyValueStore (tests)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Key-value stores and the favorites store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use explorer_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/explorer.db")).await?;
//! let favorites = db.favorites("product-favorites");
//!
//! let now_favorite = favorites.toggle(7).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::favorites::{FavoritesStore, DEFAULT_FAVORITES_KEY};
pub use repository::kv::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
