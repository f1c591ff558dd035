//! HTTP route handlers.

pub mod authenticate;
pub mod discovery;
pub mod health;
pub mod magic_links;
pub mod oauth;
pub mod session;
pub mod tasks;
pub mod well_known;

use axum::response::Response;
use brass_lantern_identity::StytchClient;

use crate::auth::AppState;
use crate::response::ProviderResponse;

/// Index handler.
pub async fn index() -> &'static str {
    "OK"
}

/// Returns the provider client, or the 500 envelope for endpoints that
/// cannot proceed without one.
pub(crate) fn require_client<'a>(
    state: &'a AppState,
    method: &'static str,
) -> Result<&'a StytchClient, Response> {
    state
        .identity
        .as_ref()
        .ok_or_else(|| ProviderResponse::error(method, "provider client is not configured"))
}
