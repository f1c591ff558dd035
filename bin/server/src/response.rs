//! Provider pass-through response envelope.
//!
//! Endpoints that wrap a single provider call answer with this envelope:
//! the provider method that was invoked, the raw provider response body,
//! and (on failure) the error text with a 500 status. This is a
//! diagnostic/example surface; a hardened boundary would not echo
//! upstream error detail.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::error;

/// The JSON envelope for provider-backed endpoints.
#[derive(Debug, Serialize)]
pub struct ProviderResponse {
    /// Name of the provider method that was called.
    pub method: &'static str,
    /// The provider response body, if the call succeeded.
    pub response: Option<Value>,
    /// Error text, if the call failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Endpoint-specific extras (e.g. discovery eligibility flags).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl ProviderResponse {
    /// A 200 envelope around a successful provider response.
    pub fn ok(method: &'static str, body: impl Serialize) -> Response {
        Self {
            method,
            response: Some(to_value(body)),
            error: None,
            metadata: None,
        }
        .into_response_with(StatusCode::OK)
    }

    /// A 200 envelope with additional endpoint metadata.
    pub fn ok_with_metadata(
        method: &'static str,
        body: impl Serialize,
        metadata: Value,
    ) -> Response {
        Self {
            method,
            response: Some(to_value(body)),
            error: None,
            metadata: Some(metadata),
        }
        .into_response_with(StatusCode::OK)
    }

    /// A 500 envelope echoing the method attempted and the error text.
    pub fn error(method: &'static str, err: impl fmt::Display) -> Response {
        let text = err.to_string();
        error!(method, error = %text, "provider call failed");
        Self {
            method,
            response: None,
            error: Some(text),
            metadata: None,
        }
        .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

fn to_value(body: impl Serialize) -> Value {
    serde_json::to_value(body).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_envelope_carries_method_and_body() {
        let envelope = ProviderResponse {
            method: "Sessions.Authenticate",
            response: Some(json!({ "member_id": "member-1" })),
            error: None,
            metadata: None,
        };

        let encoded = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(encoded["method"], "Sessions.Authenticate");
        assert_eq!(encoded["response"]["member_id"], "member-1");
        assert!(encoded.get("error").is_none());
    }

    #[test]
    fn error_envelope_includes_error_text() {
        let envelope = ProviderResponse {
            method: "Session.Revoke",
            response: None,
            error: Some("provider returned 401".to_string()),
            metadata: None,
        };

        let encoded = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(encoded["error"], "provider returned 401");
        assert_eq!(encoded["response"], Value::Null);
    }

    #[test]
    fn metadata_serializes_when_present() {
        let envelope = ProviderResponse {
            method: "Discovery.Organizations.List",
            response: Some(json!({})),
            error: None,
            metadata: Some(json!({ "canCreateOrganization": true })),
        };

        let encoded = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(encoded["metadata"]["canCreateOrganization"], true);
    }
}
