//! Role-based access control extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use harsia_core::error::CoreError;
use harsia_core::roles::can_write;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a role that may create, edit or delete records. Rejects with
/// 403 Forbidden otherwise.
///
/// ```ignore
/// async fn publish(RequireWriter(user): RequireWriter) -> AppResult<StatusCode> {
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct RequireWriter(pub AuthUser);

impl FromRequestParts<AppState> for RequireWriter {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_write(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin or editor role required".into(),
            )));
        }
        Ok(RequireWriter(user))
    }
}
