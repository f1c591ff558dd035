//! Email magic-link endpoints.
//!
//! The send endpoints are thin pass-throughs to the provider; the
//! authenticate steps additionally move the returned tokens into the
//! client's cookie jar.

use axum::{
    Json,
    extract::State,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::auth::{AppState, cookies};
use crate::response::ProviderResponse;
use crate::routes::require_client;

const INVITE_METHOD: &str = "MagicLinks.Email.Invite";
const LOGIN_OR_SIGNUP_METHOD: &str = "MagicLinks.Email.LoginOrSignup";
const DISCOVERY_SEND_METHOD: &str = "MagicLinks.Email.Discovery.Send";
const AUTHENTICATE_METHOD: &str = "MagicLinks.Authenticate";
const DISCOVERY_AUTHENTICATE_METHOD: &str = "MagicLinks.Discovery.Authenticate";

#[derive(Debug, Deserialize)]
pub struct InviteRequest {
    organization_id: String,
    email_address: String,
    #[serde(default)]
    name: String,
}

/// Sends an invite email for the specified organization.
pub async fn invite(
    State(state): State<Arc<AppState>>,
    body: Result<Json<InviteRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(req)) = body else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let client = match require_client(&state, INVITE_METHOD) {
        Ok(client) => client,
        Err(response) => return response,
    };

    match client
        .send_invite_email(&req.organization_id, &req.email_address, &req.name)
        .await
    {
        Ok(resp) => ProviderResponse::ok(INVITE_METHOD, resp),
        Err(e) => ProviderResponse::error(INVITE_METHOD, e),
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginOrSignupRequest {
    organization_id: String,
    email_address: String,
}

/// Sends a login-or-signup email for the specified organization.
pub async fn login_or_signup(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginOrSignupRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(req)) = body else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let client = match require_client(&state, LOGIN_OR_SIGNUP_METHOD) {
        Ok(client) => client,
        Err(response) => return response,
    };

    match client
        .send_login_or_signup_email(&req.organization_id, &req.email_address)
        .await
    {
        Ok(resp) => ProviderResponse::ok(LOGIN_OR_SIGNUP_METHOD, resp),
        Err(e) => ProviderResponse::error(LOGIN_OR_SIGNUP_METHOD, e),
    }
}

#[derive(Debug, Deserialize)]
pub struct DiscoverySendRequest {
    email_address: String,
}

/// Starts a discovery flow by emailing a magic link whose redirect
/// points back at the universal authenticate endpoint.
pub async fn discovery_send(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DiscoverySendRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(req)) = body else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let client = match require_client(&state, DISCOVERY_SEND_METHOD) {
        Ok(client) => client,
        Err(response) => return response,
    };

    match client
        .send_discovery_email(&req.email_address, &state.config.discovery_redirect_url())
        .await
    {
        Ok(resp) => ProviderResponse::ok(DISCOVERY_SEND_METHOD, resp),
        Err(e) => ProviderResponse::error(DISCOVERY_SEND_METHOD, e),
    }
}

/// Completes an organization-scoped magic-link flow.
///
/// Depending on the organization's authentication requirements the
/// provider returns a full session, an intermediate session, or both;
/// whichever tokens are present get stored.
pub async fn authenticate(state: &AppState, jar: CookieJar, token: &str) -> (CookieJar, Response) {
    let client = match require_client(state, AUTHENTICATE_METHOD) {
        Ok(client) => client,
        Err(response) => return (jar, response),
    };

    match client.authenticate_magic_link(token).await {
        Ok(resp) => {
            let mut jar = jar;
            if !resp.session_token.is_empty() {
                jar = cookies::store_session(jar, &resp.session_token, &state.config.session);
            }
            if !resp.intermediate_session_token.is_empty() {
                jar = cookies::store_intermediate_session(
                    jar,
                    &resp.intermediate_session_token,
                    &state.config.session,
                );
            }
            (jar, ProviderResponse::ok(AUTHENTICATE_METHOD, resp))
        }
        Err(e) => (jar, ProviderResponse::error(AUTHENTICATE_METHOD, e)),
    }
}

/// Completes a discovery magic-link flow, establishing an intermediate
/// session. The full session cookie, if any, is left untouched.
pub async fn discovery_authenticate(
    state: &AppState,
    jar: CookieJar,
    token: &str,
) -> (CookieJar, Response) {
    let client = match require_client(state, DISCOVERY_AUTHENTICATE_METHOD) {
        Ok(client) => client,
        Err(response) => return (jar, response),
    };

    match client.authenticate_discovery_magic_link(token).await {
        Ok(resp) => {
            debug!("discovery magic link verified, storing intermediate session");
            let jar = cookies::store_intermediate_session(
                jar,
                &resp.intermediate_session_token,
                &state.config.session,
            );
            (jar, ProviderResponse::ok(DISCOVERY_AUTHENTICATE_METHOD, resp))
        }
        Err(e) => (
            jar,
            ProviderResponse::error(DISCOVERY_AUTHENTICATE_METHOD, e),
        ),
    }
}
