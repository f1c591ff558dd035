//! Shared helpers for integration tests.
//!
//! Each test binary uses a subset of these.
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use brass_lantern_identity::StytchClient;
use brass_lantern_server::auth::AppState;
use brass_lantern_server::config::{ServerConfig, SessionConfig};
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

/// Creates a migrated in-memory task store.
///
/// A single connection keeps every query on the same in-memory
/// database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("connect in-memory database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    pool
}

/// Test configuration pointing at the given provider domain; an empty
/// domain leaves the Stytch variables unset.
pub fn test_config(stytch_domain: &str) -> ServerConfig {
    let configured = !stytch_domain.is_empty();
    ServerConfig {
        port: 0,
        public_base_url: "http://localhost:3001".to_string(),
        frontend_base_url: "http://localhost:3000".to_string(),
        database_url: "sqlite::memory:".to_string(),
        stytch_project_id: if configured {
            "project-test-123".to_string()
        } else {
            String::new()
        },
        stytch_project_secret: if configured {
            "secret-test-456".to_string()
        } else {
            String::new()
        },
        stytch_domain: stytch_domain.to_string(),
        session: SessionConfig {
            duration_minutes: 60,
            secure_cookies: false,
        },
    }
}

/// State with no provider client: every gated request must fail closed.
pub async fn state_without_provider() -> Arc<AppState> {
    Arc::new(AppState::new(test_pool().await, None, test_config("")))
}

/// State with a real client pointed at a stub provider.
pub async fn state_with_provider(stytch_domain: &str) -> Arc<AppState> {
    let config = test_config(stytch_domain);
    let client = StytchClient::new(config.stytch_config()).expect("construct client");
    Arc::new(AppState::new(test_pool().await, Some(client), config))
}

/// Sends one request through the router.
pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.expect("dispatch request")
}

/// Reads a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON body")
}

/// Returns every `Set-Cookie` header value on the response.
pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(axum::http::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// Extracts the value assigned to a cookie by the response, if the
/// response sets that cookie at all.
pub fn set_cookie_value(response: &Response, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    set_cookies(response).iter().find_map(|cookie| {
        let rest = cookie.strip_prefix(&prefix)?;
        Some(rest.split(';').next().unwrap_or(rest).to_string())
    })
}
