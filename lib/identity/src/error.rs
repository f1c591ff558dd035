//! Error types for provider API operations.

use std::fmt;

/// Errors from Stytch API operations.
///
/// The server's authentication gate collapses every variant into a single
/// unauthorized response; the pass-through endpoints echo the display
/// text inside their response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Required provider configuration is missing.
    IncompleteConfig,
    /// The underlying HTTP client could not be constructed.
    ClientConstruction { reason: String },
    /// The provider could not be reached or the transport failed.
    Transport { path: String, reason: String },
    /// The provider returned a non-success status.
    Api {
        path: String,
        status: u16,
        message: String,
    },
    /// The provider response body did not match the expected shape.
    UnexpectedResponse { path: String, reason: String },
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompleteConfig => {
                write!(f, "provider configuration is incomplete")
            }
            Self::ClientConstruction { reason } => {
                write!(f, "failed to construct provider client: {reason}")
            }
            Self::Transport { path, reason } => {
                write!(f, "request to '{path}' failed: {reason}")
            }
            Self::Api {
                path,
                status,
                message,
            } => {
                write!(f, "provider returned {status} for '{path}': {message}")
            }
            Self::UnexpectedResponse { path, reason } => {
                write!(f, "unexpected response from '{path}': {reason}")
            }
        }
    }
}

impl std::error::Error for IdentityError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_config_display() {
        let err = IdentityError::IncompleteConfig;
        assert!(err.to_string().contains("incomplete"));
    }

    #[test]
    fn transport_display_includes_path() {
        let err = IdentityError::Transport {
            path: "/v1/b2b/sessions/authenticate".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("/v1/b2b/sessions/authenticate"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn api_display_includes_status() {
        let err = IdentityError::Api {
            path: "/v1/b2b/sessions/revoke".to_string(),
            status: 401,
            message: "session_not_found".to_string(),
        };
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("session_not_found"));
    }
}
