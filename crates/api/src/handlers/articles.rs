//! Handlers for the `/articles` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use matzip_core::error::CoreError;
use matzip_core::storage::validate_key;
use matzip_core::types::DbId;
use matzip_db::models::article::{ArticleListParams, CreateArticle, UpdateArticle};
use matzip_db::repositories::ArticleRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Article",
        id,
    })
}

/// GET /api/v1/articles
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ArticleListParams>,
) -> AppResult<impl IntoResponse> {
    let articles = ArticleRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: articles }))
}

/// POST /api/v1/articles
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateArticle>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(key) = &input.preview_image {
        validate_key(key)?;
    }

    let article = ArticleRepo::create(&state.pool, &input).await?;
    tracing::info!(article_id = article.id, "Article created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: article })))
}

/// GET /api/v1/articles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let article = ArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: article }))
}

/// PUT /api/v1/articles/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArticle>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(key) = &input.preview_image {
        validate_key(key)?;
    }

    let article = ArticleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(article_id = id, "Article updated");

    Ok(Json(DataResponse { data: article }))
}

/// DELETE /api/v1/articles/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ArticleRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(article_id = id, "Article deleted");
    Ok(StatusCode::NO_CONTENT)
}
