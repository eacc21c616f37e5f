//! Handlers for the `/cuisine-types` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use matzip_core::error::CoreError;
use matzip_core::types::DbId;
use matzip_db::models::cuisine_type::CuisineTypeInput;
use matzip_db::repositories::CuisineTypeRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "CuisineType",
        id,
    })
}

/// GET /api/v1/cuisine-types
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = CuisineTypeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/cuisine-types
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CuisineTypeInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let item = CuisineTypeRepo::create(&state.pool, &input).await?;
    tracing::info!(cuisine_type_id = item.id, "Cuisine type created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/v1/cuisine-types/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = CuisineTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// PUT /api/v1/cuisine-types/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CuisineTypeInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let item = CuisineTypeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(cuisine_type_id = id, "Cuisine type updated");
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/cuisine-types/{id}
///
/// Categories of this cuisine type are deleted with it.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CuisineTypeRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(cuisine_type_id = id, "Cuisine type deleted");
    Ok(StatusCode::NO_CONTENT)
}
