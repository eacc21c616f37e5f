use axum::routing::{get, post};
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Upload route mounted at `/api/v1/media`.
///
/// ```text
/// POST   /                  -> upload
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(media::upload))
}

/// Public file route mounted at the root.
///
/// ```text
/// GET    /media/{*key}      -> serve
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/media/{*key}", get(media::serve))
}
