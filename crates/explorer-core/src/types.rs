//! # Domain Types
//!
//! Core domain types used throughout the Product Explorer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  FilterOptions  │   │  FavoriteSet    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u64)       │   │  search_query   │   │  ids (ordered,  │       │
//! │  │  title          │   │  category       │   │   no dupes)     │       │
//! │  │  price (Price)  │   │  favorites_only │   │                 │       │
//! │  │  rating         │   │  sort_by        │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Product: owned by the load lifecycle, never mutated locally           │
//! │  FilterOptions: transient UI state, passed by value into the engine    │
//! │  FavoriteSet: persisted, mutated only via add/remove/toggle            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Price;
use crate::ALL_CATEGORIES;

/// Catalog identifier of a product.
pub type ProductId = u64;

// =============================================================================
// Product
// =============================================================================

/// Review summary attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rating {
    /// Average rating, 0 to 5.
    pub rate: f64,

    /// Number of reviews.
    pub count: u32,
}

/// A product as returned by the remote catalog.
///
/// The field names are the catalog's JSON field names, so responses
/// deserialize directly into this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique, stable catalog identifier.
    #[ts(type = "number")]
    pub id: ProductId,

    /// Display name.
    pub title: String,

    /// Unit price, a decimal number on the wire, kept at full precision.
    pub price: Price,

    /// Long description shown on the detail page.
    pub description: String,

    /// Category name, compared exactly against the category filter.
    pub category: String,

    /// Image URI.
    pub image: String,

    /// Review summary.
    pub rating: Rating,
}

impl Product {
    /// Creates a product with empty description/image and no reviews.
    ///
    /// Handy for fixtures; real products come from the catalog.
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: impl Into<Price>,
        category: impl Into<String>,
    ) -> Self {
        Product {
            id,
            title: title.into(),
            price: price.into(),
            description: String::new(),
            category: category.into(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    /// Sets the description (builder style).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Number of filled stars out of five (the detail page floors the rate).
    pub fn filled_stars(&self) -> u8 {
        self.rating.rate.clamp(0.0, 5.0).floor() as u8
    }
}

// =============================================================================
// Sort Option
// =============================================================================

/// Ordering applied as the last stage of the filter engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Default,
    /// Price: Low to High.
    PriceAsc,
    /// Price: High to Low.
    PriceDesc,
    /// Name: A to Z.
    NameAsc,
    /// Name: Z to A.
    NameDesc,
}

impl SortOption {
    /// All options in the order the sort picker lists them.
    pub const ALL: [SortOption; 5] = [
        SortOption::Default,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::NameAsc,
        SortOption::NameDesc,
    ];

    /// Wire name (`price-asc`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortOption::Default => "default",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::NameAsc => "name-asc",
            SortOption::NameDesc => "name-desc",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "sortBy".to_string(),
                allowed: SortOption::ALL
                    .iter()
                    .map(|option| option.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Filter Options
// =============================================================================

/// The filter configuration that parameterizes the filter engine.
///
/// ## Wire Format
/// ```json
/// {
///   "searchQuery": "",
///   "selectedCategory": "all",
///   "showFavoritesOnly": false,
///   "sortBy": "default"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Case-insensitive substring matched against title and description.
    pub search_query: String,

    /// Exact category name, or [`ALL_CATEGORIES`].
    pub selected_category: String,

    /// Keep only favorited products.
    pub show_favorites_only: bool,

    /// Final ordering.
    pub sort_by: SortOption,
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions {
            search_query: String::new(),
            selected_category: ALL_CATEGORIES.to_string(),
            show_favorites_only: false,
            sort_by: SortOption::Default,
        }
    }
}

impl FilterOptions {
    /// The category to filter on, or `None` when every category is selected.
    ///
    /// An empty selection counts as "all".
    pub fn category_filter(&self) -> Option<&str> {
        match self.selected_category.as_str() {
            "" | ALL_CATEGORIES => None,
            category => Some(category),
        }
    }

    /// Returns true when applying these options is the identity transform.
    pub fn is_identity(&self) -> bool {
        self.search_query.is_empty()
            && self.category_filter().is_none()
            && !self.show_favorites_only
            && self.sort_by == SortOption::Default
    }
}

// =============================================================================
// Favorite Set
// =============================================================================

/// The set of favorited product ids.
///
/// ## Invariants
/// - No duplicate ids (duplicates in stored data collapse on load)
/// - Insertion order is kept, because the persisted form is an ordered
///   sequence; new ids are appended
///
/// Serializes as a plain JSON array: `[3, 1, 7]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ProductId>", into = "Vec<ProductId>")]
pub struct FavoriteSet {
    ids: Vec<ProductId>,
}

impl FavoriteSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        FavoriteSet::default()
    }

    /// Returns true if `id` is a favorite.
    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    /// Adds `id`; returns false if it was already present.
    pub fn insert(&mut self, id: ProductId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes `id`; returns false if it was absent.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id);
        self.ids.len() != before
    }

    /// Flips membership of `id` and returns the new membership.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in persisted order.
    pub fn as_slice(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.ids.iter().copied()
    }
}

impl From<Vec<ProductId>> for FavoriteSet {
    fn from(ids: Vec<ProductId>) -> Self {
        let mut set = FavoriteSet::new();
        for id in ids {
            set.insert(id);
        }
        set
    }
}

impl From<FavoriteSet> for Vec<ProductId> {
    fn from(set: FavoriteSet) -> Self {
        set.ids
    }
}

impl FromIterator<ProductId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        FavoriteSet::from(iter.into_iter().collect::<Vec<_>>())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
