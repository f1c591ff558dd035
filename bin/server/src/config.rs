//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables.
//!
//! The Stytch variables intentionally default to empty strings: the
//! server boots without them and the health endpoint reports what is
//! missing, while every authenticated route fails closed.

use brass_lantern_identity::StytchConfig;
use serde::Deserialize;

/// Server configuration loaded from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Publicly reachable base URL of this backend (used in OAuth
    /// metadata and discovery redirect URLs).
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Base URL of the frontend application (CORS origin and
    /// post-authentication redirect target).
    #[serde(default = "default_frontend_base_url")]
    pub frontend_base_url: String,

    /// SQLite database connection URL.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Stytch project ID (`STYTCH_PROJECT_ID`).
    #[serde(default)]
    pub stytch_project_id: String,

    /// Stytch project secret (`STYTCH_PROJECT_SECRET`).
    #[serde(default)]
    pub stytch_project_secret: String,

    /// Stytch API domain (`STYTCH_DOMAIN`).
    #[serde(default)]
    pub stytch_domain: String,

    /// Session cookie configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Session-cookie configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Cookie lifetime in minutes.
    #[serde(default = "default_session_duration_minutes")]
    pub duration_minutes: i64,

    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to true for production safety; set to false for local
    /// HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

fn default_port() -> u16 {
    3001
}

fn default_public_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_frontend_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_database_url() -> String {
    "sqlite:tasks.db?mode=rwc".to_string()
}

fn default_session_duration_minutes() -> i64 {
    60
}

fn default_secure_cookies() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_minutes: default_session_duration_minutes(),
            secure_cookies: default_secure_cookies(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if present configuration values fail to parse.
    /// Missing Stytch variables are not an error here; they surface
    /// through the health endpoint instead.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Builds the provider configuration from the Stytch variables.
    #[must_use]
    pub fn stytch_config(&self) -> StytchConfig {
        StytchConfig::new(
            self.stytch_project_id.clone(),
            self.stytch_project_secret.clone(),
            self.stytch_domain.clone(),
        )
    }

    /// The redirect URL handed to the provider for discovery emails,
    /// pointing back at the universal authenticate endpoint.
    #[must_use]
    pub fn discovery_redirect_url(&self) -> String {
        format!("{}/authenticate", self.public_base_url.trim_end_matches('/'))
    }
}
