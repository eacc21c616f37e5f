//! Article (editorial column) model and DTOs.

use matzip_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub title: String,
    /// Storage key of the preview image, if any.
    pub preview_image: Option<String>,
    pub content: String,
    pub show_at_index: bool,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new article. Both visibility flags default to `false`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateArticle {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    pub preview_image: Option<String>,
    pub content: String,
    pub show_at_index: Option<bool>,
    pub is_published: Option<bool>,
}

/// DTO for updating an existing article.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateArticle {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    pub preview_image: Option<String>,
    pub content: Option<String>,
    pub show_at_index: Option<bool>,
    pub is_published: Option<bool>,
}

/// Query parameters for `GET /api/v1/articles`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleListParams {
    pub published: Option<bool>,
    pub show_at_index: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
