//! Repository for the `cuisine_types` table.

use matzip_core::types::DbId;
use sqlx::PgPool;

use crate::models::cuisine_type::{CuisineType, CuisineTypeInput};

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for cuisine types.
pub struct CuisineTypeRepo;

impl CuisineTypeRepo {
    pub async fn create(pool: &PgPool, input: &CuisineTypeInput) -> Result<CuisineType, sqlx::Error> {
        let query = format!("INSERT INTO cuisine_types (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, CuisineType>(&query)
            .bind(input.name.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CuisineType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cuisine_types WHERE id = $1");
        sqlx::query_as::<_, CuisineType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all cuisine types ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<CuisineType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cuisine_types ORDER BY name, id");
        sqlx::query_as::<_, CuisineType>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CuisineTypeInput,
    ) -> Result<Option<CuisineType>, sqlx::Error> {
        let query =
            format!("UPDATE cuisine_types SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, CuisineType>(&query)
            .bind(id)
            .bind(input.name.trim())
            .fetch_optional(pool)
            .await
    }

    /// Delete a cuisine type. Cascades to its restaurant categories, which
    /// in turn clears `category_id` on their restaurants.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cuisine_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
