//! Stytch B2B API client for the brass-lantern service.
//!
//! This crate provides:
//! - Opaque credential newtypes (`SessionToken`, `IntermediateSessionToken`)
//! - Provider configuration (`StytchConfig`)
//! - A typed REST client (`StytchClient`) for the session, magic-link,
//!   OAuth discovery, and organization-discovery endpoints
//!
//! # Credential Model
//!
//! Tokens issued by Stytch are opaque to this service: no structure is
//! parsed locally and no validation happens outside the provider. A
//! *session token* represents a fully authenticated identity bound to one
//! organization; an *intermediate session token* represents a verified
//! identity that has not yet selected an organization. The only state
//! transitions are performed by the provider (authenticate, exchange,
//! revoke) and this client merely carries the tokens across.

pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod types;

pub use client::{DiscoveryCredential, StytchClient};
pub use config::StytchConfig;
pub use credential::{IntermediateSessionToken, MemberId, OrganizationId, SessionToken};
pub use error::IdentityError;
pub use types::{
    CreateOrganizationResponse, DiscoveredOrganization, DiscoveryAuthenticateResponse,
    ExchangeResponse, MagicLinksAuthenticateResponse, MemberSession, Organization,
    OrganizationsListResponse, SessionAuthenticateResponse,
};
