//! Repository for the `restaurants` table.
//!
//! Deleting a restaurant cascades to its images, menus and tag
//! associations at the database level.

use matzip_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use matzip_core::types::DbId;
use sqlx::PgPool;

use crate::models::restaurant::{
    CreateRestaurant, Restaurant, RestaurantDetail, RestaurantListParams, UpdateRestaurant,
};
use crate::repositories::{RestaurantImageRepo, TagRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, branch_name, description, address, feature, is_closed, \
    latitude, longitude, phone, rating, rating_count, start_time, end_time, last_order_time, \
    category_id, region_id, created_at, updated_at";

/// Provides CRUD operations for restaurants.
pub struct RestaurantRepo;

impl RestaurantRepo {
    /// Insert a new restaurant, returning the created row.
    ///
    /// If `tag_ids` is non-empty, the associations are created in the same
    /// transaction.
    pub async fn create(pool: &PgPool, input: &CreateRestaurant) -> Result<Restaurant, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO restaurants
                (name, branch_name, description, address, feature, is_closed,
                 latitude, longitude, phone, rating, rating_count,
                 start_time, end_time, last_order_time, category_id, region_id)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, false),
                     COALESCE($7, 0), COALESCE($8, 0), $9, COALESCE($10, 0), COALESCE($11, 0),
                     $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        let restaurant = sqlx::query_as::<_, Restaurant>(&query)
            .bind(&input.name)
            .bind(&input.branch_name)
            .bind(&input.description)
            .bind(&input.address)
            .bind(&input.feature)
            .bind(input.is_closed)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.phone)
            .bind(input.rating)
            .bind(input.rating_count)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.last_order_time)
            .bind(input.category_id)
            .bind(input.region_id)
            .fetch_one(&mut *tx)
            .await?;

        if !input.tag_ids.is_empty() {
            TagRepo::set_for_restaurant_inner(&mut tx, restaurant.id, &input.tag_ids).await?;
        }

        tx.commit().await?;
        Ok(restaurant)
    }

    /// Find a restaurant by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Restaurant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM restaurants WHERE id = $1");
        sqlx::query_as::<_, Restaurant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a restaurant by ID, enriched with its tags and representative image.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RestaurantDetail>, sqlx::Error> {
        let Some(restaurant) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let tags = TagRepo::list_for_restaurant(pool, id).await?;
        let representative_image = RestaurantImageRepo::find_representative(pool, id).await?;

        Ok(Some(RestaurantDetail {
            display_name: restaurant.display_name(),
            restaurant,
            tags,
            representative_image,
        }))
    }

    /// List restaurants ordered by name, with optional category, region and
    /// tag filters. Closed restaurants are excluded unless `include_closed`.
    pub async fn list(
        pool: &PgPool,
        params: &RestaurantListParams,
    ) -> Result<Vec<Restaurant>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = clamp_offset(params.offset);

        let query = format!(
            "SELECT {COLUMNS} FROM restaurants r
             WHERE ($1::bigint IS NULL OR r.category_id = $1)
               AND ($2::bigint IS NULL OR r.region_id = $2)
               AND ($3::bigint IS NULL OR EXISTS (
                        SELECT 1 FROM restaurant_tags rt
                        WHERE rt.restaurant_id = r.id AND rt.tag_id = $3))
               AND ($4 OR NOT r.is_closed)
             ORDER BY r.name, r.id
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Restaurant>(&query)
            .bind(params.category_id)
            .bind(params.region_id)
            .bind(params.tag_id)
            .bind(params.include_closed)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a restaurant. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRestaurant,
    ) -> Result<Option<Restaurant>, sqlx::Error> {
        let query = format!(
            "UPDATE restaurants SET
                name = COALESCE($2, name),
                branch_name = COALESCE($3, branch_name),
                description = COALESCE($4, description),
                address = COALESCE($5, address),
                feature = COALESCE($6, feature),
                is_closed = COALESCE($7, is_closed),
                latitude = COALESCE($8, latitude),
                longitude = COALESCE($9, longitude),
                phone = COALESCE($10, phone),
                rating = COALESCE($11, rating),
                rating_count = COALESCE($12, rating_count),
                start_time = COALESCE($13, start_time),
                end_time = COALESCE($14, end_time),
                last_order_time = COALESCE($15, last_order_time),
                category_id = COALESCE($16, category_id),
                region_id = COALESCE($17, region_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Restaurant>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.branch_name)
            .bind(&input.description)
            .bind(&input.address)
            .bind(&input.feature)
            .bind(input.is_closed)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.phone)
            .bind(input.rating)
            .bind(input.rating_count)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.last_order_time)
            .bind(input.category_id)
            .bind(input.region_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a restaurant by ID. Returns `true` if a row was removed.
    ///
    /// Images, menus and tag associations are removed by `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
