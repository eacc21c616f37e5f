//! Restaurant category model and DTOs.

use matzip_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `restaurant_categories` table.
///
/// Deleting the parent cuisine type deletes the category; deleting the
/// category clears `restaurants.category_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RestaurantCategory {
    pub id: DbId,
    pub name: String,
    pub cuisine_type_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRestaurantCategory {
    #[validate(length(min = 1, max = 20))]
    pub name: String,
    pub cuisine_type_id: Option<DbId>,
}

/// DTO for updating a category.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRestaurantCategory {
    #[validate(length(min = 1, max = 20))]
    pub name: Option<String>,
    pub cuisine_type_id: Option<DbId>,
}
