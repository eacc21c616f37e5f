//! Route definitions for restaurants and their nested resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{restaurant_images, restaurant_menus, restaurants, tags};
use crate::state::AppState;

/// Routes mounted at `/restaurants`.
///
/// ```text
/// GET    /                                        -> list
/// POST   /                                        -> create
/// GET    /{id}                                    -> get_by_id (detail)
/// PUT    /{id}                                    -> update
/// DELETE /{id}                                    -> delete
///
/// GET    /{id}/tags                               -> list_restaurant_tags
/// PUT    /{id}/tags                               -> set_restaurant_tags
/// POST   /{id}/tags/{tag_id}                      -> add_restaurant_tag
/// DELETE /{id}/tags/{tag_id}                      -> remove_restaurant_tag
///
/// GET    /{id}/images                             -> list
/// POST   /{id}/images                             -> create
/// GET    /{id}/images/{image_id}                  -> get_by_id
/// PUT    /{id}/images/{image_id}                  -> update
/// DELETE /{id}/images/{image_id}                  -> delete
/// POST   /{id}/images/{image_id}/representative   -> promote
///
/// GET    /{id}/menus                              -> list
/// POST   /{id}/menus                              -> create
/// GET    /{id}/menus/{menu_id}                    -> get_by_id
/// PUT    /{id}/menus/{menu_id}                    -> update
/// DELETE /{id}/menus/{menu_id}                    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(restaurants::list).post(restaurants::create))
        .route(
            "/{id}",
            get(restaurants::get_by_id)
                .put(restaurants::update)
                .delete(restaurants::delete),
        )
        // Tags
        .route(
            "/{id}/tags",
            get(tags::list_restaurant_tags).put(tags::set_restaurant_tags),
        )
        .route(
            "/{id}/tags/{tag_id}",
            post(tags::add_restaurant_tag).delete(tags::remove_restaurant_tag),
        )
        // Images
        .route(
            "/{id}/images",
            get(restaurant_images::list).post(restaurant_images::create),
        )
        .route(
            "/{id}/images/{image_id}",
            get(restaurant_images::get_by_id)
                .put(restaurant_images::update)
                .delete(restaurant_images::delete),
        )
        .route(
            "/{id}/images/{image_id}/representative",
            post(restaurant_images::promote),
        )
        // Menus
        .route(
            "/{id}/menus",
            get(restaurant_menus::list).post(restaurant_menus::create),
        )
        .route(
            "/{id}/menus/{menu_id}",
            get(restaurant_menus::get_by_id)
                .put(restaurant_menus::update)
                .delete(restaurant_menus::delete),
        )
}
