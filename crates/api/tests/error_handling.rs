//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use harsia_api::error::AppError;
use harsia_client::AuthError;
use harsia_core::error::CoreError;
use harsia_db::store::StoreError;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn core_not_found_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "investigation_reports",
        id: 42,
    });
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "investigation_reports with id 42 not found");
}

#[tokio::test]
async fn bad_request_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("bad lang".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "bad lang");
}

#[tokio::test]
async fn forbidden_returns_403() {
    let err = AppError::Core(CoreError::Forbidden("Admin or editor role required".into()));
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn internal_error_is_sanitized() {
    let err = AppError::InternalError("password=hunter2".into());
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_conflict_returns_409_with_message() {
    let err = AppError::Store(StoreError::Conflict(
        "Duplicate value violates unique constraint: uq_investigation_reports_report_number"
            .into(),
    ));
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        json["error"],
        "Duplicate value violates unique constraint: uq_investigation_reports_report_number"
    );
}

#[tokio::test]
async fn store_not_found_names_collection() {
    let err = AppError::Store(StoreError::NotFound {
        collection: "safety_recommendations",
        id: 7,
    });
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No safety_recommendations record with id 7");
}

#[tokio::test]
async fn store_invalid_returns_400() {
    let err = AppError::Store(StoreError::Invalid("invalid input syntax for type date".into()));
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn store_backend_failure_is_sanitized() {
    let err = AppError::Store(StoreError::Backend("pool timed out at 10.0.0.5".into()));
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Sign-in errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn auth_errors_map_to_expected_statuses() {
    let cases = [
        (AuthError::NotAuthorized, StatusCode::FORBIDDEN, "NOT_AUTHORIZED"),
        (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
        (AuthError::InvalidCode, StatusCode::UNAUTHORIZED, "INVALID_CODE"),
        (AuthError::InvalidState, StatusCode::CONFLICT, "INVALID_STATE"),
        (
            AuthError::Delivery("smtp down".into()),
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
        ),
    ];
    for (err, expected_status, expected_code) in cases {
        let (status, json) = error_to_response(AppError::Auth(err)).await;
        assert_eq!(status, expected_status);
        assert_eq!(json["code"], expected_code);
    }
}

#[tokio::test]
async fn auth_store_failure_uses_store_mapping() {
    let err = AppError::Auth(AuthError::Store(StoreError::Backend("down".into())));
    let (status, _) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
