//! Universal authenticate endpoint.
//!
//! Redirect URLs configured at the provider all point here; the
//! `stytch_token_type` query parameter identifies which product and
//! authentication flow the user is completing.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::AppState;
use crate::routes::{magic_links, oauth};

/// Token type for organization-scoped email magic links.
const TOKEN_TYPE_MAGIC_LINKS: &str = "multi_tenant_magic_links";
/// Token type for discovery email magic links.
const TOKEN_TYPE_DISCOVERY: &str = "discovery";
/// Token type for discovery OAuth flows.
const TOKEN_TYPE_DISCOVERY_OAUTH: &str = "discovery_oauth";

#[derive(Debug, Deserialize)]
pub struct AuthenticateQuery {
    #[serde(default)]
    stytch_token_type: String,
    #[serde(default)]
    token: String,
}

/// Dispatches the callback to the flow selected by `stytch_token_type`;
/// unsupported token types answer 501.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<AuthenticateQuery>,
) -> Response {
    match query.stytch_token_type.as_str() {
        TOKEN_TYPE_MAGIC_LINKS => magic_links::authenticate(&state, jar, &query.token)
            .await
            .into_response(),
        TOKEN_TYPE_DISCOVERY => magic_links::discovery_authenticate(&state, jar, &query.token)
            .await
            .into_response(),
        TOKEN_TYPE_DISCOVERY_OAUTH => oauth::discovery_authenticate(&state, jar, &query.token)
            .await
            .into_response(),
        _ => (
            StatusCode::NOT_IMPLEMENTED,
            "Authentication for this token type has not been implemented",
        )
            .into_response(),
    }
}
