//! Repository for the `restaurant_categories` table.

use matzip_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{
    CreateRestaurantCategory, RestaurantCategory, UpdateRestaurantCategory,
};

const COLUMNS: &str = "id, name, cuisine_type_id, created_at, updated_at";

/// Provides CRUD operations for restaurant categories.
pub struct RestaurantCategoryRepo;

impl RestaurantCategoryRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateRestaurantCategory,
    ) -> Result<RestaurantCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO restaurant_categories (name, cuisine_type_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RestaurantCategory>(&query)
            .bind(input.name.trim())
            .bind(input.cuisine_type_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RestaurantCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM restaurant_categories WHERE id = $1");
        sqlx::query_as::<_, RestaurantCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List categories ordered by name, optionally restricted to one cuisine type.
    pub async fn list(
        pool: &PgPool,
        cuisine_type_id: Option<DbId>,
    ) -> Result<Vec<RestaurantCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM restaurant_categories
             WHERE ($1::bigint IS NULL OR cuisine_type_id = $1)
             ORDER BY name, id"
        );
        sqlx::query_as::<_, RestaurantCategory>(&query)
            .bind(cuisine_type_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRestaurantCategory,
    ) -> Result<Option<RestaurantCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE restaurant_categories SET
                name = COALESCE($2, name),
                cuisine_type_id = COALESCE($3, cuisine_type_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RestaurantCategory>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.cuisine_type_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category. Restaurants referencing it keep existing with
    /// `category_id` set to NULL (`ON DELETE SET NULL`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM restaurant_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
