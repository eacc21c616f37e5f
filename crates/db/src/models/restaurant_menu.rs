use matzip_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `restaurant_menus` table. Deleted with its restaurant.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RestaurantMenu {
    pub id: DbId,
    pub restaurant_id: DbId,
    pub name: String,
    /// Non-negative, in the smallest currency unit.
    pub price: i64,
    /// Storage key of the menu photo, if any.
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a menu item. `restaurant_id` comes from the route.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRestaurantMenu {
    #[serde(skip)]
    pub restaurant_id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Defaults to `0`.
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    pub image: Option<String>,
}

/// DTO for updating a menu item.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRestaurantMenu {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    pub image: Option<String>,
}
