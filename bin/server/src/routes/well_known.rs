//! OAuth metadata discovery documents.
//!
//! These let OAuth-aware clients (agents, IDE integrations) discover
//! where to authorize and fetch tokens. The authorization server is the
//! identity provider; this backend only fronts the authorize endpoint.

use axum::{Json, extract::State};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::auth::AppState;

/// `/.well-known/oauth-authorization-server`
pub async fn oauth_authorization_server(State(state): State<Arc<AppState>>) -> Json<Value> {
    let base_url = state.config.public_base_url.trim_end_matches('/');
    let domain = state.config.stytch_domain.trim_end_matches('/');

    Json(json!({
        "issuer": domain,
        "authorization_endpoint": format!("{base_url}/oauth/authorize"),
        "token_endpoint": format!("{domain}/v1/oauth2/token"),
        "registration_endpoint": format!("{domain}/v1/oauth2/register"),
        "scopes_supported": ["openid", "email", "profile"],
        "response_types_supported": ["code"],
        "response_modes_supported": ["query"],
        "grant_types_supported": ["authorization_code", "refresh_token"],
        "token_endpoint_auth_methods_supported": ["none"],
        "code_challenge_methods_supported": ["S256"],
    }))
}

/// `/.well-known/oauth-protected-resource`
pub async fn oauth_protected_resource(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "resource": state.config.public_base_url.trim_end_matches('/'),
        "authorization_servers": [state.config.stytch_domain.trim_end_matches('/')],
        "scopes_supported": ["openid", "email", "profile"],
    }))
}
