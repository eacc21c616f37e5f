//! Handlers for the `/categories` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use matzip_core::error::CoreError;
use matzip_core::types::DbId;
use matzip_db::models::category::{CreateRestaurantCategory, UpdateRestaurantCategory};
use matzip_db::repositories::RestaurantCategoryRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::CategoryListParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "RestaurantCategory",
        id,
    })
}

/// GET /api/v1/categories?cuisine_type_id=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CategoryListParams>,
) -> AppResult<impl IntoResponse> {
    let items = RestaurantCategoryRepo::list(&state.pool, params.cuisine_type_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRestaurantCategory>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let item = RestaurantCategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = item.id, "Category created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = RestaurantCategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRestaurantCategory>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let item = RestaurantCategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(category_id = id, "Category updated");
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/categories/{id}
///
/// Restaurants in the category keep existing with no category.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !RestaurantCategoryRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(category_id = id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
