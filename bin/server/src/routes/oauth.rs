//! Discovery OAuth endpoints.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use crate::auth::{AppState, cookies};
use crate::response::ProviderResponse;
use crate::routes::require_client;

const DISCOVERY_OAUTH_AUTHENTICATE_METHOD: &str = "OAuth.Discovery.Authenticate";

/// Completes a discovery OAuth flow by exchanging the token received
/// from the IdP for an intermediate session, then redirects to the
/// frontend's organization picker.
///
/// Discovery flows deliberately return an intermediate session not tied
/// to any particular organization; this keeps organization membership
/// unenumerable before the user proves their identity.
pub async fn discovery_authenticate(
    state: &AppState,
    jar: CookieJar,
    token: &str,
) -> (CookieJar, Response) {
    let client = match require_client(state, DISCOVERY_OAUTH_AUTHENTICATE_METHOD) {
        Ok(client) => client,
        Err(response) => return (jar, response),
    };

    match client.authenticate_discovery_oauth(token).await {
        Ok(resp) => {
            let jar = cookies::store_intermediate_session(
                jar,
                &resp.intermediate_session_token,
                &state.config.session,
            );
            let target = format!(
                "{}/organizations",
                state.config.frontend_base_url.trim_end_matches('/')
            );
            (jar, Redirect::to(&target).into_response())
        }
        Err(e) => (
            jar,
            ProviderResponse::error(DISCOVERY_OAUTH_AUTHENTICATE_METHOD, e),
        ),
    }
}
