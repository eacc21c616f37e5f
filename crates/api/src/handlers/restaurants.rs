//! Handlers for the `/restaurants` resource.
//!
//! Images, menus and tags are nested under a restaurant and live in their
//! own handler modules.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use matzip_core::error::CoreError;
use matzip_core::types::DbId;
use matzip_db::models::restaurant::{CreateRestaurant, RestaurantListParams, UpdateRestaurant};
use matzip_db::repositories::RestaurantRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Restaurant",
        id,
    })
}

/// Return 404 unless the restaurant exists. Used by nested resources.
pub(crate) async fn ensure_restaurant_exists(state: &AppState, id: DbId) -> AppResult<()> {
    RestaurantRepo::find_by_id(&state.pool, id)
        .await?
        .map(|_| ())
        .ok_or_else(|| not_found(id))
}

/// GET /api/v1/restaurants
///
/// Closed restaurants are hidden unless `include_closed=true`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RestaurantListParams>,
) -> AppResult<impl IntoResponse> {
    let restaurants = RestaurantRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: restaurants }))
}

/// POST /api/v1/restaurants
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRestaurant>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let restaurant = RestaurantRepo::create(&state.pool, &input).await?;
    tracing::info!(
        restaurant_id = restaurant.id,
        name = %restaurant.display_name(),
        "Restaurant created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: restaurant })))
}

/// GET /api/v1/restaurants/{id}
///
/// Returns the restaurant with its display name, tags and representative image.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = RestaurantRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/restaurants/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRestaurant>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let restaurant = RestaurantRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(restaurant_id = id, "Restaurant updated");

    Ok(Json(DataResponse { data: restaurant }))
}

/// DELETE /api/v1/restaurants/{id}
///
/// Deletes the restaurant's images, menus and tag links with it.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !RestaurantRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(restaurant_id = id, "Restaurant deleted");
    Ok(StatusCode::NO_CONTENT)
}
