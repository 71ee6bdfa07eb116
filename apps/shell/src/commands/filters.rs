//! # Filter Commands
//!
//! One entry point per filter control. Each returns the options now in
//! effect so the controls can re-render from a single source.

use explorer_core::{parse_sort_option, FilterOptions, SortOption, ALL_CATEGORIES};
use tracing::debug;

use crate::error::ApiError;
use crate::state::FilterState;

/// Replaces the search query.
pub fn set_search_query(filters: &FilterState, query: &str) -> FilterOptions {
    debug!(query = %query, "set_search_query command");
    filters.update(|options| options.search_query = query.to_string())
}

/// Selects one category, or every category with `"all"`.
pub fn select_category(filters: &FilterState, category: &str) -> FilterOptions {
    debug!(category = %category, "select_category command");
    let category = if category.is_empty() { ALL_CATEGORIES } else { category };
    filters.update(|options| options.selected_category = category.to_string())
}

/// Flips the favorites-only switch.
pub fn toggle_favorites_only(filters: &FilterState) -> FilterOptions {
    let options = filters.update(|options| options.show_favorites_only = !options.show_favorites_only);
    debug!(enabled = options.show_favorites_only, "toggle_favorites_only command");
    options
}

/// Sets the ordering.
pub fn set_sort(filters: &FilterState, sort_by: SortOption) -> FilterOptions {
    debug!(sort_by = %sort_by, "set_sort command");
    filters.update(|options| options.sort_by = sort_by)
}

/// Sets the ordering from its wire name (`"price-asc"`, ...).
pub fn set_sort_by_name(filters: &FilterState, name: &str) -> Result<FilterOptions, ApiError> {
    let sort_by = parse_sort_option(name)?;
    Ok(set_sort(filters, sort_by))
}

/// Back to the defaults: no query, every category, all products, default order.
pub fn reset_filters(filters: &FilterState) -> FilterOptions {
    debug!("reset_filters command");
    filters.update(|options| *options = FilterOptions::default())
}
