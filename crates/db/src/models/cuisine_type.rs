use matzip_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `cuisine_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CuisineType {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or renaming a cuisine type.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CuisineTypeInput {
    #[validate(length(min = 1, max = 20))]
    pub name: String,
}
