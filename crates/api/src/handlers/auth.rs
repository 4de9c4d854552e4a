//! Handlers for the `/auth` resource (login, verify, logout, session).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use harsia_client::Session;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

/// Returned once the password step passes and a code is on its way.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
}

/// Successful sign-in.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: Session,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// First step: authorization record plus password. Sends a one-time code.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<LoginResponse>>)> {
    state.auth.login(&input.email, &input.password).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: LoginResponse {
                status: "otp_pending",
            },
        }),
    ))
}

/// POST /api/v1/auth/verify
///
/// Second step: a six digit code for the pending email. Returns an access
/// token bound to the new session.
pub async fn verify(
    State(state): State<AppState>,
    Json(input): Json<VerifyRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let signed_in = state.auth.verify(&input.email, &input.code).await?;
    Ok(Json(DataResponse {
        data: AuthResponse {
            access_token: signed_in.access_token,
            expires_in: signed_in.expires_in,
            user: signed_in.session,
        },
    }))
}

/// POST /api/v1/auth/logout
pub async fn logout(user: AuthUser, State(state): State<AppState>) -> StatusCode {
    state.auth.logout(&user.email).await;
    StatusCode::NO_CONTENT
}

/// GET /api/v1/auth/session
pub async fn session(user: AuthUser) -> Json<DataResponse<Session>> {
    Json(DataResponse {
        data: Session {
            user_id: user.user_id,
            email: user.email,
            name: user.name,
            role: user.role,
        },
    })
}
