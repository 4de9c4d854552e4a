pub mod auth;
pub mod health;
pub mod recommendation;
pub mod report;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /i18n/{lang}                      label catalog (public)
///
/// /auth/login                       password step (public)
/// /auth/verify                      code step (public)
/// /auth/logout                      end session (requires auth)
/// /auth/session                     current session (requires auth)
///
/// /reports                          list (public), create (writer)
/// /reports/years                    year filter options (public)
/// /reports/refresh                  re-fetch cache (writer)
/// /reports/{id}                     get (public), update, delete (writer)
///
/// /recommendations                  list (public), create (writer)
/// /recommendations/years            year filter options (public)
/// /recommendations/refresh          re-fetch cache (writer)
/// /recommendations/{id}             get (public), update, delete (writer)
///
/// /dashboard                        statistics (writer)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/i18n/{lang}", get(handlers::i18n::catalog))
        .nest("/auth", auth::router())
        .nest("/reports", report::router())
        .nest("/recommendations", recommendation::router())
        .route("/dashboard", get(handlers::dashboard::overview))
}
