//! Authentication extractors for Axum.
//!
//! Two extractors gate the task routes, one per transport:
//! [`SessionAuth`] reads the session cookie (browser flow) and
//! [`BearerAuth`] reads the `Authorization` header (programmatic/agent
//! flow). Both delegate validation to the provider and hand the
//! verified [`Identity`] to the handler as an explicit argument, so a
//! protected handler cannot be entered without one.

use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use brass_lantern_identity::{MemberId, SessionToken};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use super::{AppState, cookies};

/// A verified subject identity, produced only by the extractors below
/// after a successful provider validation.
#[derive(Debug, Clone)]
pub struct Identity {
    /// The provider-issued member identifier.
    pub member_id: MemberId,
}

/// Extractor requiring a valid session cookie.
pub struct SessionAuth(pub Identity);

impl<S> FromRequestParts<S> for SessionAuth
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthRejection::Unauthorized)?;

        let token = cookies::session_token(&jar).ok_or(AuthRejection::Unauthorized)?;

        validate(&app_state, &token).await.map(SessionAuth)
    }
}

/// Extractor requiring a valid `Authorization: Bearer` token.
pub struct BearerAuth(pub Identity);

impl<S> FromRequestParts<S> for BearerAuth
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .map(SessionToken::from)
            .ok_or(AuthRejection::Unauthorized)?;

        validate(&app_state, &token).await.map(BearerAuth)
    }
}

/// Validates an opaque session token with the provider.
///
/// Every failure collapses into the same rejection: provider client
/// missing (fail closed), provider unreachable, token rejected, or an
/// empty member identifier in the response.
async fn validate(state: &AppState, token: &SessionToken) -> Result<Identity, AuthRejection> {
    let Some(client) = state.identity.as_ref() else {
        debug!("provider client unavailable, rejecting credential");
        return Err(AuthRejection::Unauthorized);
    };

    let session = client.authenticate_session(token).await.map_err(|e| {
        debug!(error = %e, "session validation failed");
        AuthRejection::Unauthorized
    })?;

    let member_id = session.member_id().ok_or(AuthRejection::Unauthorized)?;

    Ok(Identity {
        member_id: MemberId::from(member_id),
    })
}

/// Parses a bearer token out of an `Authorization` header value.
///
/// The scheme match is case-insensitive and surrounding whitespace is
/// trimmed; an empty remainder counts as absent.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, rest) = value.split_at_checked(7)?;
    if !scheme.eq_ignore_ascii_case("bearer ") {
        return None;
    }
    let token = rest.trim();
    (!token.is_empty()).then_some(token)
}

/// Rejection type for the authentication extractors.
///
/// All causes collapse into one generic unauthorized response so the
/// body leaks nothing about which check failed.
#[derive(Debug)]
pub enum AuthRejection {
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized" })),
            )
                .into_response(),
        }
    }
}
