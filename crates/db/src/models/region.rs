use matzip_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `regions` table. Names are unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Region {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or renaming a region.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegionInput {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}
