//! Restaurant image model and DTOs.

use matzip_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `restaurant_images` table.
///
/// At most one row per `restaurant_id` has `is_representative = true`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RestaurantImage {
    pub id: DbId,
    pub restaurant_id: DbId,
    pub is_representative: bool,
    pub name: Option<String>,
    /// Storage key of the image bytes.
    pub image: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new restaurant image.
///
/// `restaurant_id` comes from the route, not the payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRestaurantImage {
    #[serde(skip)]
    pub restaurant_id: DbId,
    /// Defaults to `false`.
    pub is_representative: Option<bool>,
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub image: String,
    /// Defaults to `0`.
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
}

/// DTO for updating an existing restaurant image.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRestaurantImage {
    /// Moves the image to another restaurant.
    pub restaurant_id: Option<DbId>,
    pub is_representative: Option<bool>,
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub image: Option<String>,
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
}
