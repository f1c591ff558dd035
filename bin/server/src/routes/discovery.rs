//! Organization discovery endpoints.

use axum::{
    Json,
    extract::State,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use brass_lantern_identity::DiscoveryCredential;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::auth::{AppState, cookies};
use crate::response::ProviderResponse;
use crate::routes::require_client;

const LIST_ORGANIZATIONS_METHOD: &str = "Discovery.Organizations.List";
const CREATE_ORGANIZATION_METHOD: &str = "Discovery.Organizations.Create";

/// Lists the organizations the caller is eligible to authenticate into.
///
/// An intermediate session takes priority over a full session; only an
/// intermediate session entitles the caller to create a brand-new
/// organization, which the response flags in its metadata.
pub async fn list_organizations(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let intermediate = cookies::intermediate_session_token(&jar);
    let session = cookies::session_token(&jar);

    let (credential, ist_used) = match (&intermediate, &session) {
        (Some(token), _) => (DiscoveryCredential::Intermediate(token), true),
        (None, Some(token)) => (DiscoveryCredential::Session(token), false),
        (None, None) => {
            debug!("no session or intermediate session cookie found");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let client = match require_client(&state, LIST_ORGANIZATIONS_METHOD) {
        Ok(client) => client,
        Err(response) => return response,
    };

    match client.list_discovered_organizations(credential).await {
        Ok(resp) => ProviderResponse::ok_with_metadata(
            LIST_ORGANIZATIONS_METHOD,
            resp,
            json!({ "canCreateOrganization": ist_used }),
        ),
        Err(e) => ProviderResponse::error(LIST_ORGANIZATIONS_METHOD, e),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOrganizationRequest {
    #[serde(rename = "organizationName")]
    organization_name: String,
}

/// Creates a new organization from an intermediate session. On success
/// the caller becomes Bound: the returned session is stored and the
/// consumed intermediate session is cleared.
pub async fn create_organization(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: Result<Json<CreateOrganizationRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(req)) = body else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let Some(intermediate) = cookies::intermediate_session_token(&jar) else {
        debug!("no intermediate session cookie found");
        return StatusCode::BAD_REQUEST.into_response();
    };
    let client = match require_client(&state, CREATE_ORGANIZATION_METHOD) {
        Ok(client) => client,
        Err(response) => return response,
    };

    match client
        .create_organization(&intermediate, &req.organization_name)
        .await
    {
        Ok(resp) => {
            let jar = cookies::store_session(jar, &resp.session_token, &state.config.session);
            let jar = cookies::clear_intermediate_session(jar);
            (jar, ProviderResponse::ok(CREATE_ORGANIZATION_METHOD, resp)).into_response()
        }
        Err(e) => ProviderResponse::error(CREATE_ORGANIZATION_METHOD, e),
    }
}
