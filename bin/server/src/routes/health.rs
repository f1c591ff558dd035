//! Health and configuration check endpoint.

use axum::{Json, extract::State, response::Response};
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::auth::AppState;

#[derive(Debug, Serialize)]
struct MissingVariable {
    variable: &'static str,
    description: &'static str,
}

/// Reports which required configuration variables are missing.
///
/// Always answers 200; the `status` field carries the verdict so that
/// a half-configured deployment can still be probed.
pub async fn healthcheck(State(state): State<Arc<AppState>>) -> Response {
    let config = &state.config;
    let mut missing = Vec::new();

    if config.stytch_project_id.is_empty() {
        missing.push(MissingVariable {
            variable: "STYTCH_PROJECT_ID",
            description: "Your Stytch project ID (e.g., project-test-...)",
        });
    }
    if config.stytch_project_secret.is_empty() {
        missing.push(MissingVariable {
            variable: "STYTCH_PROJECT_SECRET",
            description: "Your Stytch secret key from Project Settings",
        });
    }
    if config.stytch_domain.is_empty() {
        missing.push(MissingVariable {
            variable: "STYTCH_DOMAIN",
            description: "Your Stytch domain (e.g., https://test.stytch.com)",
        });
    }

    if missing.is_empty() {
        Json(json!({
            "status": "ok",
            "message": "All environment variables are configured correctly",
        }))
        .into_response()
    } else {
        Json(json!({
            "status": "error",
            "errors": missing,
            "message": "Backend configuration is incomplete. Set the missing environment variables.",
        }))
        .into_response()
    }
}
