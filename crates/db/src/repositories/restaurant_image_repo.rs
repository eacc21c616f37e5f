//! Repository for the `restaurant_images` table.
//!
//! Every write that can set `is_representative` runs in a transaction that
//! first locks the owning restaurant row (`FOR NO KEY UPDATE`). Writers for
//! the same restaurant therefore queue up, and the representative check sees
//! every previously committed image before deciding. The partial unique
//! index `uq_restaurant_images_representative` backs this up; its violation
//! is reported as the same invariant error (see [`DbError`]).

use matzip_core::error::CoreError;
use matzip_core::representative::{check_representative, RepresentativeCandidate};
use matzip_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::DbError;
use crate::models::restaurant_image::{
    CreateRestaurantImage, RestaurantImage, UpdateRestaurantImage,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, restaurant_id, is_representative, name, image, sort_order, created_at, updated_at";

/// Provides CRUD operations for restaurant images.
pub struct RestaurantImageRepo;

impl RestaurantImageRepo {
    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a new image, returning the created row.
    ///
    /// Fails with [`CoreError::NotFound`] if the restaurant does not exist and
    /// with [`CoreError::InvariantViolation`] if the image is representative
    /// and the restaurant already has a representative image. Nothing is
    /// written in either case.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRestaurantImage,
    ) -> Result<RestaurantImage, DbError> {
        let mut tx = pool.begin().await?;

        lock_restaurant(&mut tx, input.restaurant_id).await?;

        let candidate = RepresentativeCandidate::for_create(
            input.restaurant_id,
            input.is_representative.unwrap_or(false),
        );
        ensure_representative_allowed(&mut tx, &candidate).await?;

        let query = format!(
            "INSERT INTO restaurant_images
                (restaurant_id, is_representative, name, image, sort_order)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0))
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, RestaurantImage>(&query)
            .bind(input.restaurant_id)
            .bind(candidate.is_representative)
            .bind(&input.name)
            .bind(&input.image)
            .bind(input.sort_order)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    /// Update an image. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no image with the given `id` exists. Moving the image
    /// to another restaurant re-runs the representative check against the
    /// target restaurant.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRestaurantImage,
    ) -> Result<Option<RestaurantImage>, DbError> {
        let Some(current) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let target_restaurant = input.restaurant_id.unwrap_or(current.restaurant_id);

        let mut tx = pool.begin().await?;

        // Lock in ascending id order so two moves in opposite directions
        // cannot deadlock.
        let mut owners = vec![current.restaurant_id, target_restaurant];
        owners.sort_unstable();
        owners.dedup();
        for owner in owners {
            lock_restaurant(&mut tx, owner).await?;
        }

        let locked_query =
            format!("SELECT {COLUMNS} FROM restaurant_images WHERE id = $1 FOR UPDATE");
        let Some(locked) = sqlx::query_as::<_, RestaurantImage>(&locked_query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        if locked.restaurant_id != current.restaurant_id {
            return Err(CoreError::Conflict(format!(
                "Restaurant image {id} was moved by a concurrent update"
            ))
            .into());
        }

        let candidate = RepresentativeCandidate::for_update(
            target_restaurant,
            id,
            input.is_representative.unwrap_or(locked.is_representative),
        );
        ensure_representative_allowed(&mut tx, &candidate).await?;

        let query = format!(
            "UPDATE restaurant_images SET
                restaurant_id = $2,
                is_representative = $3,
                name = COALESCE($4, name),
                image = COALESCE($5, image),
                sort_order = COALESCE($6, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, RestaurantImage>(&query)
            .bind(id)
            .bind(candidate.restaurant_id)
            .bind(candidate.is_representative)
            .bind(&input.name)
            .bind(&input.image)
            .bind(input.sort_order)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(image))
    }

    /// Make `image_id` the representative image of `restaurant_id`, clearing
    /// the flag on whichever image held it before.
    ///
    /// Returns `None` (and changes nothing) if the image does not belong to
    /// the restaurant.
    pub async fn promote_representative(
        pool: &PgPool,
        restaurant_id: DbId,
        image_id: DbId,
    ) -> Result<Option<RestaurantImage>, DbError> {
        let mut tx = pool.begin().await?;

        lock_restaurant(&mut tx, restaurant_id).await?;

        sqlx::query(
            "UPDATE restaurant_images SET is_representative = false \
             WHERE restaurant_id = $1 AND is_representative = true AND id <> $2",
        )
        .bind(restaurant_id)
        .bind(image_id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE restaurant_images SET is_representative = true \
             WHERE id = $1 AND restaurant_id = $2 \
             RETURNING {COLUMNS}"
        );
        let promoted = sqlx::query_as::<_, RestaurantImage>(&query)
            .bind(image_id)
            .bind(restaurant_id)
            .fetch_optional(&mut *tx)
            .await?;

        // Dropping the transaction without commit undoes the clear above.
        if promoted.is_some() {
            tx.commit().await?;
        }
        Ok(promoted)
    }

    /// Delete an image of a restaurant. Returns `true` if a row was removed.
    ///
    /// Clearing a representative image never breaks the invariant, so no
    /// lock is taken.
    pub async fn delete(pool: &PgPool, restaurant_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM restaurant_images WHERE id = $1 AND restaurant_id = $2")
                .bind(id)
                .bind(restaurant_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Find an image by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RestaurantImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM restaurant_images WHERE id = $1");
        sqlx::query_as::<_, RestaurantImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an image by ID, scoped to its owning restaurant.
    pub async fn find_for_restaurant(
        pool: &PgPool,
        restaurant_id: DbId,
        id: DbId,
    ) -> Result<Option<RestaurantImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM restaurant_images WHERE id = $1 AND restaurant_id = $2"
        );
        sqlx::query_as::<_, RestaurantImage>(&query)
            .bind(id)
            .bind(restaurant_id)
            .fetch_optional(pool)
            .await
    }

    /// List all images of a restaurant in display order.
    pub async fn list_by_restaurant(
        pool: &PgPool,
        restaurant_id: DbId,
    ) -> Result<Vec<RestaurantImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM restaurant_images
             WHERE restaurant_id = $1
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, RestaurantImage>(&query)
            .bind(restaurant_id)
            .fetch_all(pool)
            .await
    }

    /// All images of a restaurant flagged representative (zero or one row).
    pub async fn list_representative(
        pool: &PgPool,
        restaurant_id: DbId,
    ) -> Result<Vec<RestaurantImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM restaurant_images
             WHERE restaurant_id = $1 AND is_representative = true
             ORDER BY id"
        );
        sqlx::query_as::<_, RestaurantImage>(&query)
            .bind(restaurant_id)
            .fetch_all(pool)
            .await
    }

    /// The representative image of a restaurant, if it has one.
    pub async fn find_representative(
        pool: &PgPool,
        restaurant_id: DbId,
    ) -> Result<Option<RestaurantImage>, sqlx::Error> {
        Ok(Self::list_representative(pool, restaurant_id)
            .await?
            .into_iter()
            .next())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Lock the restaurant row for the rest of the transaction.
///
/// `FOR NO KEY UPDATE` serializes image writers for the same restaurant
/// without blocking unrelated inserts that only take `FOR KEY SHARE`.
async fn lock_restaurant(
    tx: &mut Transaction<'_, Postgres>,
    restaurant_id: DbId,
) -> Result<(), DbError> {
    let locked: Option<DbId> =
        sqlx::query_scalar("SELECT id FROM restaurants WHERE id = $1 FOR NO KEY UPDATE")
            .bind(restaurant_id)
            .fetch_optional(&mut **tx)
            .await?;

    match locked {
        Some(_) => Ok(()),
        None => Err(CoreError::NotFound {
            entity: "Restaurant",
            id: restaurant_id,
        }
        .into()),
    }
}

/// Run the representative check against the restaurant's current images.
async fn ensure_representative_allowed(
    tx: &mut Transaction<'_, Postgres>,
    candidate: &RepresentativeCandidate,
) -> Result<(), DbError> {
    if !candidate.is_representative {
        return Ok(());
    }

    let current: Vec<DbId> = sqlx::query_scalar(
        "SELECT id FROM restaurant_images \
         WHERE restaurant_id = $1 AND is_representative = true",
    )
    .bind(candidate.restaurant_id)
    .fetch_all(&mut **tx)
    .await?;

    check_representative(candidate, &current).inspect_err(|_| {
        tracing::warn!(
            restaurant_id = candidate.restaurant_id,
            image_id = ?candidate.image_id,
            existing = ?current,
            "Rejected second representative image",
        );
    })?;

    Ok(())
}
