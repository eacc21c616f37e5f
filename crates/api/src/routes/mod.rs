pub mod articles;
pub mod health;
pub mod lookups;
pub mod media;
pub mod restaurants;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /articles                         editorial columns
/// /restaurants                      restaurants, with nested
///   /{id}/tags                        tag associations
///   /{id}/images                      photos (one representative)
///   /{id}/menus                       menu items
/// /categories                       restaurant categories
/// /cuisine-types                    cuisine types
/// /regions                          regions
/// /tags                             tags
/// /media                            image upload
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/articles", articles::router())
        .nest("/restaurants", restaurants::router())
        .nest("/categories", lookups::categories_router())
        .nest("/cuisine-types", lookups::cuisine_types_router())
        .nest("/regions", lookups::regions_router())
        .nest("/tags", lookups::tags_router())
        .nest("/media", media::router())
}
