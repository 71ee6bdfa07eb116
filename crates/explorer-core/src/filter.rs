//! # Filter Engine
//!
//! The pure transformation from (products, filters, favorites) to the
//! ordered list the grid renders.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  &[Product] ──► 1. Search ──► 2. Category ──► 3. Favorites ──► 4. Sort  │
//! │                 title or      exact match     id in set       stable    │
//! │                 description   unless "all"    when enabled              │
//! │                 contains q                                              │
//! │                                                                  │      │
//! │                                                        Vec<Product> ◄─┘  │
//! │                                                                         │
//! │  Never mutates the input. Empty output is a valid result.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;

use crate::types::{FavoriteSet, FilterOptions, Product, SortOption};

// =============================================================================
// Engine Entry Point
// =============================================================================

/// Applies all four stages and returns a new, ordered collection.
///
/// ## Example
/// ```rust
/// use explorer_core::{filter_products, FavoriteSet, FilterOptions, Money, Product};
///
/// let products = vec![
///     Product::new(1, "Red Shirt", Money::from_cents(1000), "clothing"),
///     Product::new(2, "Blue Hat", Money::from_cents(500), "clothing"),
/// ];
/// let filters = FilterOptions {
///     search_query: "red".to_string(),
///     ..FilterOptions::default()
/// };
///
/// let visible = filter_products(&products, &filters, &FavoriteSet::new());
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].id, 1);
/// ```
pub fn filter_products(
    products: &[Product],
    filters: &FilterOptions,
    favorites: &FavoriteSet,
) -> Vec<Product> {
    let needle = filters.search_query.to_lowercase();
    let category = filters.category_filter();

    let mut result: Vec<Product> = products
        .iter()
        .filter(|product| needle.is_empty() || matches_lowercase(product, &needle))
        .filter(|product| category.map_or(true, |c| product.category == c))
        .filter(|product| !filters.show_favorites_only || favorites.contains(product.id))
        .cloned()
        .collect();

    sort_products(&mut result, filters.sort_by);
    result
}

// =============================================================================
// Stage Helpers
// =============================================================================

/// Case-insensitive substring match on title or description.
///
/// An empty query matches everything.
pub fn matches_search(product: &Product, query: &str) -> bool {
    query.is_empty() || matches_lowercase(product, &query.to_lowercase())
}

fn matches_lowercase(product: &Product, needle: &str) -> bool {
    product.title.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
}

/// Sorts in place. `slice::sort_by` is stable, so ties keep their relative
/// order for both directions.
pub fn sort_products(products: &mut [Product], sort_by: SortOption) {
    match sort_by {
        SortOption::Default => {}
        SortOption::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOption::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOption::NameAsc => products.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortOption::NameDesc => products.sort_by(|a, b| compare_titles(&b.title, &a.title)),
    }
}

thread_local! {
    // Default locale is root (`und`).
    static COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new()).ok();
}

/// Collation for product names.
///
/// Uses the root (language-neutral) Unicode collation: letters compare
/// ignoring accents and case first, lowercase sorts before uppercase on a
/// tie, and punctuation sorts before digits and letters. Falls back to code
/// point order only if the collation data cannot be loaded.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
