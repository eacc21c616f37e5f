//! Repository for the `restaurant_menus` table.

use matzip_core::types::DbId;
use sqlx::PgPool;

use crate::models::restaurant_menu::{
    CreateRestaurantMenu, RestaurantMenu, UpdateRestaurantMenu,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, restaurant_id, name, price, image, created_at, updated_at";

/// Provides CRUD operations for menu items.
pub struct RestaurantMenuRepo;

impl RestaurantMenuRepo {
    /// Insert a new menu item. If `price` is `None`, defaults to `0`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRestaurantMenu,
    ) -> Result<RestaurantMenu, sqlx::Error> {
        let query = format!(
            "INSERT INTO restaurant_menus (restaurant_id, name, price, image)
             VALUES ($1, $2, COALESCE($3, 0), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RestaurantMenu>(&query)
            .bind(input.restaurant_id)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    /// Find a menu item by ID, scoped to its owning restaurant.
    pub async fn find_for_restaurant(
        pool: &PgPool,
        restaurant_id: DbId,
        id: DbId,
    ) -> Result<Option<RestaurantMenu>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM restaurant_menus WHERE id = $1 AND restaurant_id = $2"
        );
        sqlx::query_as::<_, RestaurantMenu>(&query)
            .bind(id)
            .bind(restaurant_id)
            .fetch_optional(pool)
            .await
    }

    /// List all menu items of a restaurant, ordered by name.
    pub async fn list_by_restaurant(
        pool: &PgPool,
        restaurant_id: DbId,
    ) -> Result<Vec<RestaurantMenu>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM restaurant_menus
             WHERE restaurant_id = $1
             ORDER BY name, id"
        );
        sqlx::query_as::<_, RestaurantMenu>(&query)
            .bind(restaurant_id)
            .fetch_all(pool)
            .await
    }

    /// Update a menu item. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the item does not exist or belongs to another restaurant.
    pub async fn update(
        pool: &PgPool,
        restaurant_id: DbId,
        id: DbId,
        input: &UpdateRestaurantMenu,
    ) -> Result<Option<RestaurantMenu>, sqlx::Error> {
        let query = format!(
            "UPDATE restaurant_menus SET
                name = COALESCE($3, name),
                price = COALESCE($4, price),
                image = COALESCE($5, image)
             WHERE id = $1 AND restaurant_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RestaurantMenu>(&query)
            .bind(id)
            .bind(restaurant_id)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.image)
            .fetch_optional(pool)
            .await
    }

    /// Delete a menu item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, restaurant_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM restaurant_menus WHERE id = $1 AND restaurant_id = $2")
                .bind(id)
                .bind(restaurant_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
