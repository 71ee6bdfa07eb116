//! # Favorites Commands

use explorer_core::ProductId;
use explorer_db::KeyValueStore;
use serde::Serialize;
use ts_rs::TS;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::FavoritesState;

/// Result of a heart click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FavoriteToggle {
    #[ts(type = "number")]
    pub product_id: ProductId,
    pub is_favorite: bool,
    pub favorites_count: usize,
}

/// Toggles `product_id` and persists the new set.
///
/// On a storage failure the session set is left as it was and the error is
/// returned.
pub async fn toggle_favorite<S: KeyValueStore>(
    favorites: &FavoritesState<S>,
    product_id: ProductId,
) -> Result<FavoriteToggle, ApiError> {
    debug!(product_id, "toggle_favorite command");

    let is_favorite = favorites.toggle(product_id).await?;
    let favorites_count = favorites.snapshot().len();

    info!(product_id, is_favorite, "Favorite toggled");
    Ok(FavoriteToggle {
        product_id,
        is_favorite,
        favorites_count,
    })
}

/// Favorite ids in insertion order.
pub fn favorite_ids<S: KeyValueStore>(favorites: &FavoritesState<S>) -> Vec<ProductId> {
    favorites.snapshot().into()
}
