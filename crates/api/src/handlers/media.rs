//! Image upload and serving.
//!
//! Uploads are stored through the configured [`ImageStorage`] backend and
//! identified by the returned key, which records then reference.
//!
//! [`ImageStorage`]: matzip_core::storage::ImageStorage

use axum::extract::{Multipart, Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use matzip_core::storage::{content_type_for_key, validate_namespace, NAMESPACE_RESTAURANT};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/media
///
/// Accepts a multipart form with a required `file` field and an optional
/// `namespace` field (default `restaurant`). Returns the stored key.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut namespace = NAMESPACE_RESTAURANT.to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file_data = Some(data.to_vec());
            }
            "namespace" => {
                namespace = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
                    .trim()
                    .to_string();
            }
            _ => {}
        }
    }

    let data =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    validate_namespace(&namespace)?;

    let stored = state.storage.put(&namespace, &data).await?;
    tracing::info!(
        key = %stored.key,
        size_bytes = stored.size_bytes,
        content_type = stored.content_type,
        "Image uploaded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: stored })))
}

/// GET /media/{*key}
///
/// Serves stored image bytes with a content type derived from the key.
pub async fn serve(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let bytes = state
        .storage
        .get(&key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No media stored at '{key}'")))?;

    let content_type = content_type_for_key(&key).unwrap_or("application/octet-stream");
    Ok(([(CONTENT_TYPE, content_type)], bytes))
}
