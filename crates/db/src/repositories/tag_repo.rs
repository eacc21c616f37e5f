//! Repository for the `tags` and `restaurant_tags` tables.
//!
//! Provides tag CRUD and the many-to-many association between restaurants
//! and tags.

use matzip_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::tag::{Tag, TagInput};

/// Column list for `tags` queries.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for tags and restaurant-tag associations.
pub struct TagRepo;

impl TagRepo {
    // -----------------------------------------------------------------------
    // Tag CRUD
    // -----------------------------------------------------------------------

    /// Insert a tag. Fails with a `uq_tags_name` violation on duplicates.
    pub async fn create(pool: &PgPool, input: &TagInput) -> Result<Tag, sqlx::Error> {
        let query = format!("INSERT INTO tags (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Tag>(&query)
            .bind(normalize_tag_name(&input.name))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags ORDER BY name");
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &TagInput,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("UPDATE tags SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .bind(normalize_tag_name(&input.name))
            .fetch_optional(pool)
            .await
    }

    /// Delete a tag by ID. Cascade deletes all restaurant-tag associations.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Restaurant-tag associations
    // -----------------------------------------------------------------------

    /// List all tags applied to a restaurant, ordered by name.
    pub async fn list_for_restaurant(
        pool: &PgPool,
        restaurant_id: DbId,
    ) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name, t.created_at, t.updated_at \
             FROM restaurant_tags rt \
             JOIN tags t ON t.id = rt.tag_id \
             WHERE rt.restaurant_id = $1 \
             ORDER BY t.name",
        )
        .bind(restaurant_id)
        .fetch_all(pool)
        .await
    }

    /// Apply a tag to a restaurant. Idempotent: returns `false` if already applied.
    pub async fn add_to_restaurant(
        pool: &PgPool,
        restaurant_id: DbId,
        tag_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO restaurant_tags (restaurant_id, tag_id) VALUES ($1, $2) \
             ON CONFLICT (restaurant_id, tag_id) DO NOTHING",
        )
        .bind(restaurant_id)
        .bind(tag_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a tag from a restaurant. Returns `true` if an association was removed.
    pub async fn remove_from_restaurant(
        pool: &PgPool,
        restaurant_id: DbId,
        tag_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM restaurant_tags WHERE restaurant_id = $1 AND tag_id = $2")
                .bind(restaurant_id)
                .bind(tag_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the tag set of a restaurant in a single transaction.
    pub async fn set_for_restaurant(
        pool: &PgPool,
        restaurant_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<Vec<Tag>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        Self::set_for_restaurant_inner(&mut tx, restaurant_id, tag_ids).await?;
        tx.commit().await?;

        Self::list_for_restaurant(pool, restaurant_id).await
    }

    /// Replace associations inside an existing transaction.
    pub(crate) async fn set_for_restaurant_inner(
        tx: &mut Transaction<'_, Postgres>,
        restaurant_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM restaurant_tags WHERE restaurant_id = $1")
            .bind(restaurant_id)
            .execute(&mut **tx)
            .await?;

        if !tag_ids.is_empty() {
            sqlx::query(
                "INSERT INTO restaurant_tags (restaurant_id, tag_id) \
                 SELECT $1, UNNEST($2::bigint[]) \
                 ON CONFLICT (restaurant_id, tag_id) DO NOTHING",
            )
            .bind(restaurant_id)
            .bind(tag_ids)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Normalize a tag name: trim whitespace and lowercase.
fn normalize_tag_name(name: &str) -> String {
    name.trim().to_lowercase()
}
