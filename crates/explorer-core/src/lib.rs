//! # explorer-core: Pure Catalog Logic for the Product Explorer
//!
//! This crate holds everything in the explorer that is actual logic rather
//! than I/O: the product data model, prices, the favorites set and the
//! filter/sort engine.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Product Explorer Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation (web UI)                        │   │
//! │  │    Search Bar ──► Category / Sort ──► Grid ──► Detail Page      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ entry points                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    explorer-shell                               │   │
//! │  │    start, retry, set_search_query, toggle_favorite, listing     │   │
//! │  └───────┬─────────────────────┬────────────────────────┬──────────┘   │
//! │          │                     │                        │              │
//! │  ┌───────▼────────┐   ┌────────▼──────────┐   ┌─────────▼──────────┐   │
//! │  │ explorer-      │   │ ★ explorer-core ★ │   │ explorer-db        │   │
//! │  │ catalog (HTTP) │   │  types  money     │   │ favorites (SQLite) │   │
//! │  │                │   │  filter validation│   │                    │   │
//! │  └────────────────┘   │  NO I/O           │   └────────────────────┘   │
//! │                       └───────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, FilterOptions, FavoriteSet, etc.)
//! - [`money`] - Full-precision prices and their rounded display amount
//! - [`filter`] - The filter/sort engine
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use explorer_core::{filter_products, FavoriteSet, FilterOptions, Money, Product, SortOption};
//!
//! let products = vec![
//!     Product::new(1, "Red Shirt", Money::from_cents(1000), "clothing"),
//!     Product::new(2, "Blue Hat", Money::from_cents(500), "clothing"),
//! ];
//!
//! let filters = FilterOptions {
//!     sort_by: SortOption::PriceAsc,
//!     ..FilterOptions::default()
//! };
//!
//! let visible = filter_products(&products, &filters, &FavoriteSet::new());
//! assert_eq!(visible[0].title, "Blue Hat");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod filter;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{compare_titles, filter_products, matches_search, sort_products};
pub use money::{Money, Price};
pub use types::*;
pub use validation::{parse_product_id, parse_sort_option, ValidationResult};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category selection that disables the category filter.
///
/// The catalog never returns this value as a real category name, so the
/// presentation layer can offer it as the first entry of the category list.
pub const ALL_CATEGORIES: &str = "all";
