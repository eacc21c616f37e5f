//! Tag model and DTOs.

use matzip_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `tags` table. Names are unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or renaming a tag.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TagInput {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

/// DTO replacing the full tag set of a restaurant.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRestaurantTags {
    pub tag_ids: Vec<DbId>,
}
