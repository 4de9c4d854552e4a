#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use harsia_api::auth::jwt::JwtConfig;
use harsia_api::auth::AuthService;
use harsia_api::config::ServerConfig;
use harsia_api::router::build_app_router;
use harsia_api::state::AppState;
use harsia_client::auth::verifier::hash_password;
use harsia_client::auth::{AllowListVerifier, SimulatedCodeSender};
use harsia_db::models::admin_user::CreateAdminUser;
use harsia_db::store::{MemoryRecordStore, RecordStore};

pub const ADMIN_EMAIL: &str = "admin@harsia.gr";
pub const ADMIN_PASSWORD: &str = "approach-lights-on";

/// Build a test `ServerConfig` with safe defaults and no code dispatch delay.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
        admin_allow_list: String::new(),
        otp_send_delay_ms: 0,
    }
}

/// Build the full application router over `store`.
///
/// Registers [`ADMIN_EMAIL`] as an admin user with [`ADMIN_PASSWORD`] on the
/// allow-list, then loads both caches the way `main.rs` does at startup.
pub async fn build_test_app(store: MemoryRecordStore) -> Router {
    build_test_app_with_state(store).await.0
}

/// Like [`build_test_app`], also returning the state for direct inspection.
pub async fn build_test_app_with_state(store: MemoryRecordStore) -> (Router, AppState) {
    let config = test_config();
    store
        .seed_admin_user(CreateAdminUser {
            email: ADMIN_EMAIL.to_string(),
            name: "Admin".to_string(),
            role: None,
        })
        .await
        .expect("admin user should seed");

    let verifier = AllowListVerifier::from_entries([(
        ADMIN_EMAIL.to_string(),
        hash_password(ADMIN_PASSWORD).expect("hashing should succeed"),
    )])
    .expect("allow-list should build");

    let store: Arc<dyn RecordStore> = Arc::new(store);
    let auth = AuthService::new(
        store.clone(),
        Arc::new(verifier),
        Arc::new(SimulatedCodeSender::new(Duration::ZERO)),
        config.jwt.clone(),
    );
    let state = AppState::new(store, auth, config.clone(), None);
    state.load_caches().await;

    (build_app_router(state.clone(), &config), state)
}

/// Run both sign-in steps for the test admin and return the access token.
pub async fn sign_in(app: &Router) -> String {
    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/verify",
        serde_json::json!({ "email": ADMIN_EMAIL, "code": "123456" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"]["access_token"]
        .as_str()
        .expect("access_token should be a string")
        .to_string()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}
