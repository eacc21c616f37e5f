//! Repository for the `regions` table.

use matzip_core::types::DbId;
use sqlx::PgPool;

use crate::models::region::{Region, RegionInput};

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for regions.
pub struct RegionRepo;

impl RegionRepo {
    /// Insert a region. Fails with a `uq_regions_name` violation on duplicates.
    pub async fn create(pool: &PgPool, input: &RegionInput) -> Result<Region, sqlx::Error> {
        let query = format!("INSERT INTO regions (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Region>(&query)
            .bind(input.name.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Region>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM regions WHERE id = $1");
        sqlx::query_as::<_, Region>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Region>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM regions ORDER BY name");
        sqlx::query_as::<_, Region>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &RegionInput,
    ) -> Result<Option<Region>, sqlx::Error> {
        let query = format!("UPDATE regions SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Region>(&query)
            .bind(id)
            .bind(input.name.trim())
            .fetch_optional(pool)
            .await
    }

    /// Delete a region. Referencing restaurants get `region_id = NULL`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM regions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
