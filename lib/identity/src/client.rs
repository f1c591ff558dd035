//! Stytch B2B REST client.

use crate::config::StytchConfig;
use crate::credential::{IntermediateSessionToken, OrganizationId, SessionToken};
use crate::error::IdentityError;
use crate::types::{
    CreateOrganizationResponse, DiscoveryAuthenticateResponse, ExchangeResponse,
    MagicLinksAuthenticateResponse, OrganizationsListResponse, SessionAuthenticateResponse,
};
use rootcause::prelude::Report;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, instrument};

/// The credential used to drive an organization-discovery listing.
///
/// Intermediate sessions take priority over full sessions when both are
/// present; only an intermediate session entitles the caller to create a
/// brand-new organization.
#[derive(Debug, Clone)]
pub enum DiscoveryCredential<'a> {
    /// A verified identity that has not selected an organization yet.
    Intermediate(&'a IntermediateSessionToken),
    /// A full session already bound to some organization.
    Session(&'a SessionToken),
}

/// Client for the Stytch B2B API.
///
/// Constructed once at startup with project credentials and shared
/// across requests; the inner reqwest client pools connections and is
/// safe for concurrent use.
#[derive(Debug, Clone)]
pub struct StytchClient {
    http: reqwest::Client,
    config: StytchConfig,
}

impl StytchClient {
    /// Creates a new provider client.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is incomplete or the
    /// underlying HTTP client cannot be built. Callers are expected to
    /// treat a construction failure as "reject every credential" rather
    /// than aborting the process.
    pub fn new(config: StytchConfig) -> Result<Self, Report<IdentityError>> {
        if !config.is_complete() {
            return Err(IdentityError::IncompleteConfig.into());
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| IdentityError::ClientConstruction {
                reason: e.to_string(),
            })?;

        Ok(Self { http, config })
    }

    /// Returns the provider configuration.
    #[must_use]
    pub fn config(&self) -> &StytchConfig {
        &self.config
    }

    /// Authenticates a session token, the single validation call behind
    /// both transport gates.
    #[instrument(skip(self, token))]
    pub async fn authenticate_session(
        &self,
        token: &SessionToken,
    ) -> Result<SessionAuthenticateResponse, Report<IdentityError>> {
        self.post_typed(
            "/v1/b2b/sessions/authenticate",
            json!({ "session_token": token.as_str() }),
        )
        .await
    }

    /// Exchanges a full session for a new one scoped to a different
    /// organization (tenant switch).
    #[instrument(skip(self, token))]
    pub async fn exchange_session(
        &self,
        token: &SessionToken,
        organization_id: &OrganizationId,
    ) -> Result<ExchangeResponse, Report<IdentityError>> {
        self.post_typed(
            "/v1/b2b/sessions/exchange",
            json!({
                "session_token": token.as_str(),
                "organization_id": organization_id.as_str(),
            }),
        )
        .await
    }

    /// Revokes a session at the provider.
    #[instrument(skip(self, token))]
    pub async fn revoke_session(
        &self,
        token: &SessionToken,
    ) -> Result<Value, Report<IdentityError>> {
        self.post(
            "/v1/b2b/sessions/revoke",
            json!({ "session_token": token.as_str() }),
        )
        .await
    }

    /// Consumes an intermediate session, producing a full session in the
    /// target organization.
    #[instrument(skip(self, token))]
    pub async fn exchange_intermediate_session(
        &self,
        token: &IntermediateSessionToken,
        organization_id: &OrganizationId,
    ) -> Result<ExchangeResponse, Report<IdentityError>> {
        self.post_typed(
            "/v1/b2b/discovery/intermediate_sessions/exchange",
            json!({
                "intermediate_session_token": token.as_str(),
                "organization_id": organization_id.as_str(),
            }),
        )
        .await
    }

    /// Sends a login-or-signup magic link email for one organization.
    #[instrument(skip_all)]
    pub async fn send_login_or_signup_email(
        &self,
        organization_id: &str,
        email_address: &str,
    ) -> Result<Value, Report<IdentityError>> {
        self.post(
            "/v1/b2b/magic_links/email/login_or_signup",
            json!({
                "organization_id": organization_id,
                "email_address": email_address,
            }),
        )
        .await
    }

    /// Sends an invite magic link email for one organization.
    #[instrument(skip_all)]
    pub async fn send_invite_email(
        &self,
        organization_id: &str,
        email_address: &str,
        name: &str,
    ) -> Result<Value, Report<IdentityError>> {
        self.post(
            "/v1/b2b/magic_links/email/invite",
            json!({
                "organization_id": organization_id,
                "email_address": email_address,
                "name": name,
            }),
        )
        .await
    }

    /// Sends a discovery magic link email. The redirect URL points back
    /// at the universal authenticate endpoint.
    #[instrument(skip_all)]
    pub async fn send_discovery_email(
        &self,
        email_address: &str,
        discovery_redirect_url: &str,
    ) -> Result<Value, Report<IdentityError>> {
        self.post(
            "/v1/b2b/magic_links/email/discovery/send",
            json!({
                "email_address": email_address,
                "discovery_redirect_url": discovery_redirect_url,
            }),
        )
        .await
    }

    /// Authenticates an organization-scoped magic-link token.
    #[instrument(skip(self, token))]
    pub async fn authenticate_magic_link(
        &self,
        token: &str,
    ) -> Result<MagicLinksAuthenticateResponse, Report<IdentityError>> {
        self.post_typed(
            "/v1/b2b/magic_links/authenticate",
            json!({ "magic_links_token": token }),
        )
        .await
    }

    /// Authenticates a discovery magic-link token, yielding an
    /// intermediate session.
    #[instrument(skip(self, token))]
    pub async fn authenticate_discovery_magic_link(
        &self,
        token: &str,
    ) -> Result<DiscoveryAuthenticateResponse, Report<IdentityError>> {
        self.post_typed(
            "/v1/b2b/magic_links/discovery/authenticate",
            json!({ "discovery_magic_links_token": token }),
        )
        .await
    }

    /// Authenticates a discovery OAuth token, yielding an intermediate
    /// session.
    #[instrument(skip(self, token))]
    pub async fn authenticate_discovery_oauth(
        &self,
        token: &str,
    ) -> Result<DiscoveryAuthenticateResponse, Report<IdentityError>> {
        self.post_typed(
            "/v1/b2b/oauth/discovery/authenticate",
            json!({ "discovery_oauth_token": token }),
        )
        .await
    }

    /// Lists organizations the credential holder is eligible to
    /// authenticate into.
    #[instrument(skip(self, credential))]
    pub async fn list_discovered_organizations(
        &self,
        credential: DiscoveryCredential<'_>,
    ) -> Result<OrganizationsListResponse, Report<IdentityError>> {
        let body = match credential {
            DiscoveryCredential::Intermediate(token) => {
                json!({ "intermediate_session_token": token.as_str() })
            }
            DiscoveryCredential::Session(token) => {
                json!({ "session_token": token.as_str() })
            }
        };
        self.post_typed("/v1/b2b/discovery/organizations", body).await
    }

    /// Creates a new organization from an intermediate session. The
    /// intermediate session is consumed; the response carries a full
    /// session in the new organization.
    #[instrument(skip(self, token))]
    pub async fn create_organization(
        &self,
        token: &IntermediateSessionToken,
        organization_name: &str,
    ) -> Result<CreateOrganizationResponse, Report<IdentityError>> {
        self.post_typed(
            "/v1/b2b/discovery/organizations/create",
            json!({
                "intermediate_session_token": token.as_str(),
                "organization_name": organization_name,
            }),
        )
        .await
    }

    async fn post_typed<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<T, Report<IdentityError>> {
        let payload = self.post(path, body).await?;
        serde_json::from_value(payload).map_err(|e| {
            IdentityError::UnexpectedResponse {
                path: path.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, Report<IdentityError>> {
        let url = format!("{}{}", self.config.domain(), path);

        let response = self
            .http
            .post(&url)
            .basic_auth(self.config.project_id(), Some(self.config.secret()))
            .json(&body)
            .send()
            .await
            .map_err(|e| IdentityError::Transport {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| IdentityError::Transport {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .map(|payload| api_error_message(&payload))
                .unwrap_or(text);
            return Err(IdentityError::Api {
                path: path.to_string(),
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let payload: Value =
            serde_json::from_str(&text).map_err(|e| IdentityError::UnexpectedResponse {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        debug!(path, status = status.as_u16(), "provider call succeeded");

        Ok(payload)
    }
}

/// Pulls the most useful error description out of a provider error body.
fn api_error_message(payload: &Value) -> String {
    for key in ["error_message", "error_type", "error"] {
        if let Some(message) = payload.get(key).and_then(Value::as_str) {
            if !message.is_empty() {
                return message.to_string();
            }
        }
    }
    payload.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_config() -> StytchConfig {
        StytchConfig::new(
            "project-test-123".to_string(),
            "secret-test-456".to_string(),
            "https://test.stytch.com".to_string(),
        )
    }

    #[test]
    fn new_rejects_incomplete_config() {
        let config = StytchConfig::new(String::new(), String::new(), String::new());
        assert!(StytchClient::new(config).is_err());
    }

    #[test]
    fn new_accepts_complete_config() {
        assert!(StytchClient::new(complete_config()).is_ok());
    }

    #[test]
    fn api_error_message_prefers_error_message_field() {
        let payload = json!({
            "error_type": "session_not_found",
            "error_message": "Session could not be found."
        });
        assert_eq!(api_error_message(&payload), "Session could not be found.");
    }

    #[test]
    fn api_error_message_falls_back_to_raw_body() {
        let payload = json!({ "unexpected": true });
        assert!(api_error_message(&payload).contains("unexpected"));
    }
}
