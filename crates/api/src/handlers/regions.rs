//! Handlers for the `/regions` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use matzip_core::error::CoreError;
use matzip_core::types::DbId;
use matzip_db::models::region::RegionInput;
use matzip_db::repositories::RegionRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Region",
        id,
    })
}

pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = RegionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/regions
///
/// Duplicate names are rejected with 409 by `uq_regions_name`.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<RegionInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let item = RegionRepo::create(&state.pool, &input).await?;
    tracing::info!(region_id = item.id, "Region created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = RegionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RegionInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let item = RegionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(region_id = id, "Region updated");
    Ok(Json(DataResponse { data: item }))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !RegionRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(region_id = id, "Region deleted");
    Ok(StatusCode::NO_CONTENT)
}
