//! Typed provider response payloads.
//!
//! Every struct flattens unrecognized fields into an `extra` map so the
//! full provider body survives a decode/re-encode round trip; handlers
//! echo these payloads verbatim inside their response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The member session object embedded in a session-authenticate response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberSession {
    #[serde(default)]
    pub member_id: String,
    #[serde(default)]
    pub organization_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response from `POST /v1/b2b/sessions/authenticate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionAuthenticateResponse {
    #[serde(default)]
    pub member_session: Option<MemberSession>,
    #[serde(default)]
    pub session_token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionAuthenticateResponse {
    /// Returns the verified member ID, or `None` when the provider did
    /// not attach one. An empty identifier counts as absent.
    #[must_use]
    pub fn member_id(&self) -> Option<&str> {
        self.member_session
            .as_ref()
            .map(|s| s.member_id.as_str())
            .filter(|id| !id.is_empty())
    }
}

/// Response from `POST /v1/b2b/magic_links/authenticate`.
///
/// Depending on the target organization's authentication requirements
/// the provider may return a full session, an intermediate session, or
/// both; empty strings mean the respective token was not issued.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MagicLinksAuthenticateResponse {
    #[serde(default)]
    pub member_id: String,
    #[serde(default)]
    pub session_token: String,
    #[serde(default)]
    pub intermediate_session_token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response from the discovery authenticate endpoints (magic-link and
/// OAuth variants), which establish an intermediate session only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryAuthenticateResponse {
    #[serde(default)]
    pub intermediate_session_token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response from the intermediate-session and session exchange endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeResponse {
    #[serde(default)]
    pub session_token: String,
    #[serde(default)]
    pub member_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An organization the caller is eligible to authenticate into.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub organization_id: String,
    #[serde(default)]
    pub organization_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A discovery listing entry wrapping an organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveredOrganization {
    #[serde(default)]
    pub organization: Option<Organization>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response from `POST /v1/b2b/discovery/organizations`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationsListResponse {
    #[serde(default)]
    pub discovered_organizations: Vec<DiscoveredOrganization>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response from `POST /v1/b2b/discovery/organizations/create`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrganizationResponse {
    #[serde(default)]
    pub session_token: String,
    #[serde(default)]
    pub organization: Option<Organization>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
