//! Session cookie storage.
//!
//! Both credentials live in HTTP-only cookies on the client; the server
//! keeps no session state of its own. An empty cookie value is treated
//! the same as an absent cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use brass_lantern_identity::{IntermediateSessionToken, SessionToken};
use time::Duration;

use crate::config::SessionConfig;

/// Full session cookie name.
pub const SESSION_COOKIE: &str = "stytch_session";

/// Intermediate session cookie name (discovery flows).
pub const INTERMEDIATE_SESSION_COOKIE: &str = "stytch_intermediate_session";

/// Reads the session token from the jar, if one exists.
#[must_use]
pub fn session_token(jar: &CookieJar) -> Option<SessionToken> {
    read(jar, SESSION_COOKIE).map(SessionToken::new)
}

/// Reads the intermediate session token from the jar, if one exists.
#[must_use]
pub fn intermediate_session_token(jar: &CookieJar) -> Option<IntermediateSessionToken> {
    read(jar, INTERMEDIATE_SESSION_COOKIE).map(IntermediateSessionToken::new)
}

/// Instructs the client to store a session token cookie.
#[must_use]
pub fn store_session(jar: CookieJar, token: &str, config: &SessionConfig) -> CookieJar {
    jar.add(build(SESSION_COOKIE, token, config))
}

/// Instructs the client to store an intermediate session token cookie.
#[must_use]
pub fn store_intermediate_session(jar: CookieJar, token: &str, config: &SessionConfig) -> CookieJar {
    jar.add(build(INTERMEDIATE_SESSION_COOKIE, token, config))
}

/// Instructs the client to clear the session cookie.
#[must_use]
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.add(expire(SESSION_COOKIE))
}

/// Instructs the client to clear the intermediate session cookie.
#[must_use]
pub fn clear_intermediate_session(jar: CookieJar) -> CookieJar {
    jar.add(expire(INTERMEDIATE_SESSION_COOKIE))
}

fn read(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

fn build(name: &'static str, token: &str, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((name, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(config.duration_minutes))
        .build()
}

fn expire(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").max_age(Duration::ZERO).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SessionConfig {
        SessionConfig::default()
    }

    #[test]
    fn absent_cookie_reads_as_none() {
        let jar = CookieJar::new();
        assert!(session_token(&jar).is_none());
        assert!(intermediate_session_token(&jar).is_none());
    }

    #[test]
    fn empty_cookie_reads_as_none() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, ""));
        assert!(session_token(&jar).is_none());
    }

    #[test]
    fn stored_session_reads_back() {
        let jar = store_session(CookieJar::new(), "session-abc", &config());
        let token = session_token(&jar).expect("session token");
        assert_eq!(token.as_str(), "session-abc");
    }

    #[test]
    fn stored_intermediate_session_reads_back() {
        let jar = store_intermediate_session(CookieJar::new(), "ist-xyz", &config());
        let token = intermediate_session_token(&jar).expect("intermediate token");
        assert_eq!(token.as_str(), "ist-xyz");
    }

    #[test]
    fn session_cookie_is_http_only_and_scoped_to_root() {
        let jar = store_session(CookieJar::new(), "session-abc", &config());
        let cookie = jar.get(SESSION_COOKIE).expect("cookie");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn clearing_expires_the_cookie() {
        let jar = store_session(CookieJar::new(), "session-abc", &config());
        let jar = clear_session(jar);
        let cookie = jar.get(SESSION_COOKIE).expect("cookie");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }

    #[test]
    fn clearing_intermediate_leaves_session_alone() {
        let jar = store_session(CookieJar::new(), "session-abc", &config());
        let jar = store_intermediate_session(jar, "ist-xyz", &config());
        let jar = clear_intermediate_session(jar);

        assert!(session_token(&jar).is_some());
        assert!(intermediate_session_token(&jar).is_none());
    }
}
