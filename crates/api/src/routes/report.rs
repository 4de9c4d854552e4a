//! Route definitions for the `/reports` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::report;
use crate::state::AppState;

/// Routes mounted at `/reports`.
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
        .route("/", get(report::list).post(report::create))
        .route("/years", get(report::years))
        .route("/refresh", post(report::refresh))
        .route(
            "/{id}",
            get(report::get_by_id)
                .put(report::update)
                .delete(report::delete),
        )
}
