//! Handlers for menu items nested under `/restaurants/{restaurant_id}/menus`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use matzip_core::error::CoreError;
use matzip_core::storage::validate_key;
use matzip_core::types::DbId;
use matzip_db::models::restaurant_menu::{CreateRestaurantMenu, UpdateRestaurantMenu};
use matzip_db::repositories::RestaurantMenuRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::restaurants::ensure_restaurant_exists;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "RestaurantMenu",
        id,
    })
}

pub async fn list(
    State(state): State<AppState>,
    Path(restaurant_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_restaurant_exists(&state, restaurant_id).await?;
    let menus = RestaurantMenuRepo::list_by_restaurant(&state.pool, restaurant_id).await?;
    Ok(Json(DataResponse { data: menus }))
}

pub async fn create(
    State(state): State<AppState>,
    Path(restaurant_id): Path<DbId>,
    Json(mut input): Json<CreateRestaurantMenu>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(key) = &input.image {
        validate_key(key)?;
    }
    ensure_restaurant_exists(&state, restaurant_id).await?;
    input.restaurant_id = restaurant_id;

    let menu = RestaurantMenuRepo::create(&state.pool, &input).await?;
    tracing::info!(restaurant_id, menu_id = menu.id, "Menu item created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: menu })))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path((restaurant_id, menu_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let menu = RestaurantMenuRepo::find_for_restaurant(&state.pool, restaurant_id, menu_id)
        .await?
        .ok_or_else(|| not_found(menu_id))?;
    Ok(Json(DataResponse { data: menu }))
}

pub async fn update(
    State(state): State<AppState>,
    Path((restaurant_id, menu_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateRestaurantMenu>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(key) = &input.image {
        validate_key(key)?;
    }

    let menu = RestaurantMenuRepo::update(&state.pool, restaurant_id, menu_id, &input)
        .await?
        .ok_or_else(|| not_found(menu_id))?;
    tracing::info!(restaurant_id, menu_id, "Menu item updated");

    Ok(Json(DataResponse { data: menu }))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((restaurant_id, menu_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !RestaurantMenuRepo::delete(&state.pool, restaurant_id, menu_id).await? {
        return Err(not_found(menu_id));
    }
    tracing::info!(restaurant_id, menu_id, "Menu item deleted");
    Ok(StatusCode::NO_CONTENT)
}
