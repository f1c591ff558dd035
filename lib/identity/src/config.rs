//! Provider configuration for the Stytch API client.

use serde::{Deserialize, Serialize};

/// Configuration for connecting to the Stytch B2B API.
///
/// All three values come from the project's Stytch dashboard. The config
/// may be constructed with empty values (the server boots without
/// provider credentials and reports them via its health endpoint), but
/// [`crate::StytchClient::new`] refuses an incomplete config so that
/// authentication fails closed instead of calling the provider with
/// unusable credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StytchConfig {
    /// The Stytch project ID (e.g., "project-test-...").
    project_id: String,
    /// The project secret from the Stytch dashboard.
    secret: String,
    /// The API domain (e.g., "https://test.stytch.com").
    domain: String,
}

impl StytchConfig {
    /// Creates a new provider configuration.
    #[must_use]
    pub fn new(project_id: String, secret: String, domain: String) -> Self {
        Self {
            project_id,
            secret,
            domain,
        }
    }

    /// Returns the project ID.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Returns the project secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Returns the API domain without a trailing slash.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.domain.trim_end_matches('/')
    }

    /// Returns true when all required values are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.project_id.is_empty() && !self.secret.is_empty() && !self.domain.is_empty()
    }
}
