//! Restaurant model and DTOs.

use matzip_core::restaurant::{
    display_name, validate_latitude, validate_longitude, validate_phone, validate_rating,
};
use matzip_core::types::{DbId, TimeOfDay, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::restaurant_image::RestaurantImage;
use crate::models::tag::Tag;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `restaurants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Restaurant {
    pub id: DbId,
    pub name: String,
    pub branch_name: Option<String>,
    pub description: Option<String>,
    pub address: String,
    pub feature: Option<String>,
    pub is_closed: bool,
    /// `NUMERIC(16,12)`.
    pub latitude: Decimal,
    /// `NUMERIC(16,12)`.
    pub longitude: Decimal,
    /// E.164, e.g. `+821012345678`.
    pub phone: String,
    /// `NUMERIC(3,2)` in `[0, 9.99]`.
    pub rating: Decimal,
    pub rating_count: i32,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub last_order_time: Option<TimeOfDay>,
    /// Cleared when the category is deleted.
    pub category_id: Option<DbId>,
    /// Cleared when the region is deleted.
    pub region_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Restaurant {
    /// `"{name} {branch}"` for branches, otherwise the plain name.
    pub fn display_name(&self) -> String {
        display_name(&self.name, self.branch_name.as_deref())
    }
}

/// Restaurant enriched with its tags and representative image.
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantDetail {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub display_name: String,
    pub tags: Vec<Tag>,
    pub representative_image: Option<RestaurantImage>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a new restaurant.
///
/// Omitted numeric fields take the column defaults (coordinates and rating
/// `0`, `rating_count` `0`, `is_closed` `false`).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRestaurant {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 100))]
    pub branch_name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[validate(length(max = 255))]
    pub feature: Option<String>,
    pub is_closed: Option<bool>,
    #[validate(custom(function = "validate_latitude"))]
    pub latitude: Option<Decimal>,
    #[validate(custom(function = "validate_longitude"))]
    pub longitude: Option<Decimal>,
    #[validate(length(max = 16), custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(custom(function = "validate_rating"))]
    pub rating: Option<Decimal>,
    #[validate(range(min = 0))]
    pub rating_count: Option<i32>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub last_order_time: Option<TimeOfDay>,
    pub category_id: Option<DbId>,
    pub region_id: Option<DbId>,
    /// Initial tag set; applied in the same transaction as the insert.
    #[serde(default)]
    pub tag_ids: Vec<DbId>,
}

/// DTO for updating an existing restaurant. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRestaurant {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub branch_name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,
    #[validate(length(max = 255))]
    pub feature: Option<String>,
    pub is_closed: Option<bool>,
    #[validate(custom(function = "validate_latitude"))]
    pub latitude: Option<Decimal>,
    #[validate(custom(function = "validate_longitude"))]
    pub longitude: Option<Decimal>,
    #[validate(length(max = 16), custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(custom(function = "validate_rating"))]
    pub rating: Option<Decimal>,
    #[validate(range(min = 0))]
    pub rating_count: Option<i32>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub last_order_time: Option<TimeOfDay>,
    pub category_id: Option<DbId>,
    pub region_id: Option<DbId>,
}

/// Query parameters for `GET /api/v1/restaurants`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantListParams {
    pub category_id: Option<DbId>,
    pub region_id: Option<DbId>,
    pub tag_id: Option<DbId>,
    /// Closed restaurants are hidden unless this is `true`.
    #[serde(default)]
    pub include_closed: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
