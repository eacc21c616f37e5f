//! Repository for the `articles` table.

use matzip_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use matzip_core::types::DbId;
use sqlx::PgPool;

use crate::models::article::{Article, ArticleListParams, CreateArticle, UpdateArticle};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, preview_image, content, show_at_index, is_published, \
    created_at, updated_at";

/// Provides CRUD operations for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateArticle) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles (title, preview_image, content, show_at_index, is_published)
             VALUES ($1, $2, $3, COALESCE($4, false), COALESCE($5, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&input.title)
            .bind(&input.preview_image)
            .bind(&input.content)
            .bind(input.show_at_index)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    /// Find an article by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List articles, newest first. `None` filters match any value.
    pub async fn list(
        pool: &PgPool,
        params: &ArticleListParams,
    ) -> Result<Vec<Article>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = clamp_offset(params.offset);

        let query = format!(
            "SELECT {COLUMNS} FROM articles
             WHERE ($1::boolean IS NULL OR is_published = $1)
               AND ($2::boolean IS NULL OR show_at_index = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(params.published)
            .bind(params.show_at_index)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update an article. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArticle,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE articles SET
                title = COALESCE($2, title),
                preview_image = COALESCE($3, preview_image),
                content = COALESCE($4, content),
                show_at_index = COALESCE($5, show_at_index),
                is_published = COALESCE($6, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.preview_image)
            .bind(&input.content)
            .bind(input.show_at_index)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete an article by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
