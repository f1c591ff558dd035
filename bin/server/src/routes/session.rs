//! Session lifecycle endpoints: exchange, inspection, logout.

use axum::{
    Json,
    extract::State,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use brass_lantern_identity::OrganizationId;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::auth::{AppState, cookies};
use crate::response::ProviderResponse;
use crate::routes::require_client;

const INTERMEDIATE_EXCHANGE_METHOD: &str = "Discovery.IntermediateSessions.Exchange";
const SESSION_EXCHANGE_METHOD: &str = "Sessions.Exchange";
const GET_CURRENT_SESSION_METHOD: &str = "Session.GetCurrentSession";
const REVOKE_METHOD: &str = "Session.Revoke";

#[derive(Debug, Deserialize)]
pub struct ExchangeRequest {
    organization_id: String,
}

/// Exchanges the caller's credential for a full session in the target
/// organization.
///
/// With an intermediate session present, the intermediate session is
/// consumed (Discovered → Bound) and its cookie cleared. With only a
/// full session present, the session itself is exchanged (tenant
/// switch) and the intermediate cookie is not touched. With neither,
/// the request is malformed.
pub async fn exchange(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: Result<Json<ExchangeRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(req)) = body else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let organization_id = OrganizationId::new(req.organization_id);

    if let Some(intermediate) = cookies::intermediate_session_token(&jar) {
        let client = match require_client(&state, INTERMEDIATE_EXCHANGE_METHOD) {
            Ok(client) => client,
            Err(response) => return response,
        };
        return match client
            .exchange_intermediate_session(&intermediate, &organization_id)
            .await
        {
            Ok(resp) => {
                let jar = cookies::store_session(jar, &resp.session_token, &state.config.session);
                let jar = cookies::clear_intermediate_session(jar);
                (jar, ProviderResponse::ok(INTERMEDIATE_EXCHANGE_METHOD, resp)).into_response()
            }
            Err(e) => ProviderResponse::error(INTERMEDIATE_EXCHANGE_METHOD, e),
        };
    }

    if let Some(session) = cookies::session_token(&jar) {
        let client = match require_client(&state, SESSION_EXCHANGE_METHOD) {
            Ok(client) => client,
            Err(response) => return response,
        };
        return match client.exchange_session(&session, &organization_id).await {
            Ok(resp) => {
                let jar = cookies::store_session(jar, &resp.session_token, &state.config.session);
                (jar, ProviderResponse::ok(SESSION_EXCHANGE_METHOD, resp)).into_response()
            }
            Err(e) => ProviderResponse::error(SESSION_EXCHANGE_METHOD, e),
        };
    }

    debug!("no session or intermediate session cookie found");
    StatusCode::BAD_REQUEST.into_response()
}

/// Returns the provider's view of the caller's current session, as
/// determined by the session cookie.
pub async fn get_current_session(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let Some(token) = cookies::session_token(&jar) else {
        debug!("no session token found");
        return StatusCode::BAD_REQUEST.into_response();
    };
    let client = match require_client(&state, GET_CURRENT_SESSION_METHOD) {
        Ok(client) => client,
        Err(response) => return response,
    };

    match client.authenticate_session(&token).await {
        Ok(resp) => ProviderResponse::ok(GET_CURRENT_SESSION_METHOD, resp),
        Err(e) => ProviderResponse::error(GET_CURRENT_SESSION_METHOD, e),
    }
}

/// Revokes the caller's session at the provider and clears both
/// credential cookies.
///
/// The cookies are cleared even when the revoke call fails: the client
/// must never keep a credential the server attempted to kill. The
/// response still reports the revoke outcome.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let Some(token) = cookies::session_token(&jar) else {
        debug!("no session token found");
        return StatusCode::BAD_REQUEST.into_response();
    };
    let client = match require_client(&state, REVOKE_METHOD) {
        Ok(client) => client,
        Err(response) => return response,
    };

    let result = client.revoke_session(&token).await;

    let jar = cookies::clear_session(jar);
    let jar = cookies::clear_intermediate_session(jar);

    match result {
        Ok(resp) => (jar, ProviderResponse::ok(REVOKE_METHOD, resp)).into_response(),
        Err(e) => (jar, ProviderResponse::error(REVOKE_METHOD, e)).into_response(),
    }
}
