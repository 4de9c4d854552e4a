//! Route definitions for the `/recommendations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::recommendation;
use crate::state::AppState;

/// Routes mounted at `/recommendations`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /years     -> years
/// POST   /refresh   -> refresh
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recommendation::list).post(recommendation::create))
        .route("/years", get(recommendation::years))
        .route("/refresh", post(recommendation::refresh))
        .route(
            "/{id}",
            get(recommendation::get_by_id)
                .put(recommendation::update)
                .delete(recommendation::delete),
        )
}
