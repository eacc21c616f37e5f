//! Route definitions for the lookup tables restaurants reference.
//!
//! Each router is mounted at its own prefix and exposes the same shape:
//!
//! ```text
//! GET    /                  -> list
//! POST   /                  -> create
//! GET    /{id}              -> get
//! PUT    /{id}              -> update
//! DELETE /{id}              -> delete
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::{categories, cuisine_types, regions, tags};
use crate::state::AppState;

/// Mounted at `/categories`. Listing accepts `?cuisine_type_id=`.
pub fn categories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list).post(categories::create))
        .route(
            "/{id}",
            get(categories::get_by_id)
                .put(categories::update)
                .delete(categories::delete),
        )
}

/// Mounted at `/cuisine-types`.
pub fn cuisine_types_router() -> Router<AppState> {
    Router::new()
        .route("/", get(cuisine_types::list).post(cuisine_types::create))
        .route(
            "/{id}",
            get(cuisine_types::get_by_id)
                .put(cuisine_types::update)
                .delete(cuisine_types::delete),
        )
}

/// Mounted at `/regions`.
pub fn regions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(regions::list).post(regions::create))
        .route(
            "/{id}",
            get(regions::get_by_id)
                .put(regions::update)
                .delete(regions::delete),
        )
}

/// Mounted at `/tags`.
pub fn tags_router() -> Router<AppState> {
    Router::new()
        .route("/", get(tags::list_tags).post(tags::create_tag))
        .route(
            "/{id}",
            get(tags::get_tag).put(tags::update_tag).delete(tags::delete_tag),
        )
}
