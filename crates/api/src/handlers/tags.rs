//! Handlers for tags and restaurant-tag associations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use matzip_core::error::CoreError;
use matzip_core::types::DbId;
use matzip_db::models::tag::{SetRestaurantTags, TagInput};
use matzip_db::repositories::{RestaurantRepo, TagRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::restaurants::ensure_restaurant_exists;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Tag", id })
}

// ---------------------------------------------------------------------------
// Tag CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/tags
pub async fn list_tags(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tags = TagRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/tags
///
/// Names are trimmed and lowercased; duplicates are rejected with 409.
pub async fn create_tag(
    State(state): State<AppState>,
    Json(input): Json<TagInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let tag = TagRepo::create(&state.pool, &input).await?;
    tracing::info!(tag_id = tag.id, name = %tag.name, "Tag created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// GET /api/v1/tags/{id}
pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tag = TagRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: tag }))
}

/// PUT /api/v1/tags/{id}
pub async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TagInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let tag = TagRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(tag_id = id, "Tag updated");
    Ok(Json(DataResponse { data: tag }))
}

/// DELETE /api/v1/tags/{id}
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TagRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(tag_id = id, "Tag deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Restaurant tags
// ---------------------------------------------------------------------------

/// GET /api/v1/restaurants/{id}/tags
pub async fn list_restaurant_tags(
    State(state): State<AppState>,
    Path(restaurant_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_restaurant_exists(&state, restaurant_id).await?;
    let tags = TagRepo::list_for_restaurant(&state.pool, restaurant_id).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// PUT /api/v1/restaurants/{id}/tags
///
/// Replaces the full tag set. Unknown tag ids fail with 422.
pub async fn set_restaurant_tags(
    State(state): State<AppState>,
    Path(restaurant_id): Path<DbId>,
    Json(input): Json<SetRestaurantTags>,
) -> AppResult<impl IntoResponse> {
    ensure_restaurant_exists(&state, restaurant_id).await?;
    let tags = TagRepo::set_for_restaurant(&state.pool, restaurant_id, &input.tag_ids).await?;
    tracing::info!(restaurant_id, count = tags.len(), "Restaurant tags replaced");
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/restaurants/{id}/tags/{tag_id}
pub async fn add_restaurant_tag(
    State(state): State<AppState>,
    Path((restaurant_id, tag_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_restaurant_exists(&state, restaurant_id).await?;
    TagRepo::find_by_id(&state.pool, tag_id)
        .await?
        .ok_or_else(|| not_found(tag_id))?;

    let added = TagRepo::add_to_restaurant(&state.pool, restaurant_id, tag_id).await?;
    if added {
        tracing::info!(restaurant_id, tag_id, "Tag applied to restaurant");
        Ok(StatusCode::CREATED)
    } else {
        Ok(StatusCode::OK)
    }
}

/// DELETE /api/v1/restaurants/{id}/tags/{tag_id}
pub async fn remove_restaurant_tag(
    State(state): State<AppState>,
    Path((restaurant_id, tag_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !TagRepo::remove_from_restaurant(&state.pool, restaurant_id, tag_id).await? {
        RestaurantRepo::find_by_id(&state.pool, restaurant_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Restaurant",
                id: restaurant_id,
            }))?;
        return Err(not_found(tag_id));
    }
    tracing::info!(restaurant_id, tag_id, "Tag removed from restaurant");
    Ok(StatusCode::NO_CONTENT)
}
