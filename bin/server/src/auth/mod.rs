//! Authentication module for the brass-lantern server.
//!
//! This module provides:
//! - Session and intermediate-session cookie handling
//! - The dual-transport authentication gate (cookie and bearer
//!   extractors sharing one provider-validation pipeline)
//! - Shared application state
//!
//! # Validation Model
//!
//! Tokens are opaque; every gated request makes exactly one
//! provider call (`sessions/authenticate`) and either yields a verified
//! [`middleware::Identity`] or a single collapsed unauthorized
//! rejection. Nothing about the failure cause is exposed to the caller.

pub mod cookies;
pub mod middleware;

pub use middleware::{AuthRejection, BearerAuth, Identity, SessionAuth};

use crate::config::ServerConfig;
use brass_lantern_identity::StytchClient;
use sqlx::SqlitePool;

/// Shared application state.
///
/// Constructed once in `main` and injected into every handler through
/// axum state; there is no ambient/global lookup anywhere in the
/// request path.
pub struct AppState {
    /// Database connection pool.
    pub db_pool: SqlitePool,
    /// Provider client. `None` when construction failed at startup, in
    /// which case every gated request fails closed.
    pub identity: Option<StytchClient>,
    /// Server configuration.
    pub config: ServerConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(db_pool: SqlitePool, identity: Option<StytchClient>, config: ServerConfig) -> Self {
        Self {
            db_pool,
            identity,
            config,
        }
    }
}
