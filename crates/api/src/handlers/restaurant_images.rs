//! Handlers for restaurant images.
//!
//! Images are nested under restaurants:
//! `/restaurants/{restaurant_id}/images[/{image_id}]`
//!
//! A restaurant has at most one representative image. Writes that would add
//! a second one fail with 409 `INVARIANT_VIOLATION`; use the
//! `/representative` action to swap it instead.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use matzip_core::error::CoreError;
use matzip_core::storage::validate_key;
use matzip_core::types::DbId;
use matzip_db::models::restaurant_image::{CreateRestaurantImage, UpdateRestaurantImage};
use matzip_db::repositories::RestaurantImageRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::restaurants::ensure_restaurant_exists;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "RestaurantImage",
        id,
    })
}

/// GET /api/v1/restaurants/{restaurant_id}/images
pub async fn list(
    State(state): State<AppState>,
    Path(restaurant_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_restaurant_exists(&state, restaurant_id).await?;
    let images = RestaurantImageRepo::list_by_restaurant(&state.pool, restaurant_id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// POST /api/v1/restaurants/{restaurant_id}/images
pub async fn create(
    State(state): State<AppState>,
    Path(restaurant_id): Path<DbId>,
    Json(mut input): Json<CreateRestaurantImage>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_key(&input.image)?;
    input.restaurant_id = restaurant_id;

    let image = RestaurantImageRepo::create(&state.pool, &input).await?;
    tracing::info!(
        restaurant_id,
        image_id = image.id,
        is_representative = image.is_representative,
        "Restaurant image created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

/// GET /api/v1/restaurants/{restaurant_id}/images/{image_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((restaurant_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let image = RestaurantImageRepo::find_for_restaurant(&state.pool, restaurant_id, image_id)
        .await?
        .ok_or_else(|| not_found(image_id))?;
    Ok(Json(DataResponse { data: image }))
}

/// PUT /api/v1/restaurants/{restaurant_id}/images/{image_id}
///
/// Setting `restaurant_id` in the body moves the image; the representative
/// rule is checked against the target restaurant.
pub async fn update(
    State(state): State<AppState>,
    Path((restaurant_id, image_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateRestaurantImage>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(key) = &input.image {
        validate_key(key)?;
    }

    RestaurantImageRepo::find_for_restaurant(&state.pool, restaurant_id, image_id)
        .await?
        .ok_or_else(|| not_found(image_id))?;

    let image = RestaurantImageRepo::update(&state.pool, image_id, &input)
        .await?
        .ok_or_else(|| not_found(image_id))?;
    tracing::info!(
        restaurant_id = image.restaurant_id,
        image_id,
        is_representative = image.is_representative,
        "Restaurant image updated",
    );

    Ok(Json(DataResponse { data: image }))
}

/// POST /api/v1/restaurants/{restaurant_id}/images/{image_id}/representative
///
/// Makes this image the representative one, clearing the previous holder in
/// the same transaction.
pub async fn promote(
    State(state): State<AppState>,
    Path((restaurant_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let image = RestaurantImageRepo::promote_representative(&state.pool, restaurant_id, image_id)
        .await?
        .ok_or_else(|| not_found(image_id))?;
    tracing::info!(restaurant_id, image_id, "Representative image changed");
    Ok(Json(DataResponse { data: image }))
}

/// DELETE /api/v1/restaurants/{restaurant_id}/images/{image_id}
pub async fn delete(
    State(state): State<AppState>,
    Path((restaurant_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !RestaurantImageRepo::delete(&state.pool, restaurant_id, image_id).await? {
        return Err(not_found(image_id));
    }
    tracing::info!(restaurant_id, image_id, "Restaurant image deleted");
    Ok(StatusCode::NO_CONTENT)
}
