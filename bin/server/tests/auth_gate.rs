//! Gate behavior without a usable provider client, plus the
//! unauthenticated operational surfaces.
//!
//! With no provider configured, every credential must be rejected
//! (fail closed) before any handler or store access.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use brass_lantern_server::app::app;
use common::{body_json, send, state_with_provider, state_without_provider};

#[tokio::test]
async fn index_answers_ok() {
    let app = app(state_without_provider().await);

    let response = send(
        &app,
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn tasks_without_credential_are_unauthorized() {
    let app = app(state_without_provider().await);

    let response = send(
        &app,
        Request::builder().uri("/tasks").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn empty_session_cookie_is_unauthorized() {
    let app = app(state_without_provider().await);

    let response = send(
        &app,
        Request::builder()
            .uri("/tasks")
            .header(header::COOKIE, "stytch_session=")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_cookie_fails_closed_without_provider_client() {
    let app = app(state_without_provider().await);

    let response = send(
        &app,
        Request::builder()
            .uri("/tasks")
            .header(header::COOKIE, "stytch_session=session-alice")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bearer_gate_rejects_missing_and_malformed_headers() {
    let app = app(state_without_provider().await);

    for authorization in [None, Some("Basic abc"), Some("Bearer "), Some("Bearer")] {
        let mut builder = Request::builder().uri("/agent/tasks");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let response = send(&app, builder.body(Body::empty()).unwrap()).await;
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "header {authorization:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn rejected_create_leaves_store_untouched() {
    let state = state_without_provider().await;
    let app = app(state.clone());

    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/tasks")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"taskText":"never stored"}"#))
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
        .fetch_one(&state.db_pool)
        .await
        .expect("count tasks");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn unknown_token_type_is_not_implemented() {
    let app = app(state_without_provider().await);

    let response = send(
        &app,
        Request::builder()
            .uri("/authenticate?stytch_token_type=pkce&token=abc")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn missing_token_type_is_not_implemented() {
    let app = app(state_without_provider().await);

    let response = send(
        &app,
        Request::builder()
            .uri("/authenticate?token=abc")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn discovery_listing_without_credentials_is_bad_request() {
    let app = app(state_without_provider().await);

    let response = send(
        &app,
        Request::builder()
            .uri("/discovery/organizations")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    // The provider client is missing too, but the 500 envelope only
    // applies once a credential is present; no-credential is a 400.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn exchange_without_credentials_is_bad_request() {
    let app = app(state_without_provider().await);

    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/sessions/exchange")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"organization_id":"organization-test-1"}"#))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn exchange_with_malformed_json_is_bad_request() {
    let app = app(state_without_provider().await);

    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/sessions/exchange")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn current_session_without_cookie_is_bad_request() {
    let app = app(state_without_provider().await);

    let response = send(
        &app,
        Request::builder().uri("/session").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_without_cookie_is_bad_request() {
    let app = app(state_without_provider().await);

    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/logout")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn magic_link_send_with_malformed_json_is_bad_request() {
    let app = app(state_without_provider().await);

    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/magic-links/login-signup")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"organization_id": 42}"#))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn healthcheck_reports_missing_variables() {
    let app = app(state_without_provider().await);

    let response = send(
        &app,
        Request::builder()
            .uri("/api/healthcheck")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");

    let variables: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .filter_map(|e| e["variable"].as_str())
        .collect();
    assert_eq!(
        variables,
        vec![
            "STYTCH_PROJECT_ID",
            "STYTCH_PROJECT_SECRET",
            "STYTCH_DOMAIN"
        ]
    );
}

#[tokio::test]
async fn healthcheck_is_ok_when_fully_configured() {
    let app = app(state_with_provider("https://test.stytch.com").await);

    let response = send(
        &app,
        Request::builder()
            .uri("/api/healthcheck")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn authorization_server_metadata_derives_from_config() {
    let app = app(state_with_provider("https://test.stytch.com").await);

    let response = send(
        &app,
        Request::builder()
            .uri("/.well-known/oauth-authorization-server")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["issuer"], "https://test.stytch.com");
    assert_eq!(
        body["authorization_endpoint"],
        "http://localhost:3001/oauth/authorize"
    );
    assert_eq!(
        body["token_endpoint"],
        "https://test.stytch.com/v1/oauth2/token"
    );
    assert_eq!(body["code_challenge_methods_supported"][0], "S256");
}

#[tokio::test]
async fn protected_resource_metadata_matches_on_subpaths() {
    let app = app(state_with_provider("https://test.stytch.com").await);

    for uri in [
        "/.well-known/oauth-protected-resource",
        "/.well-known/oauth-protected-resource/tasks",
    ] {
        let response = send(
            &app,
            Request::builder().uri(uri).body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["resource"], "http://localhost:3001");
        assert_eq!(body["authorization_servers"][0], "https://test.stytch.com");
    }
}
