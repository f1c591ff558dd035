//! Router assembly.

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::AppState;
use crate::routes;

/// Builds the application router with all routes and middleware.
///
/// # Panics
///
/// Panics when the configured frontend base URL is not a valid header
/// value; this is startup wiring, not a request-path failure.
pub fn app(state: Arc<AppState>) -> Router {
    let frontend_origin = state
        .config
        .frontend_base_url
        .parse::<HeaderValue>()
        .expect("frontend base URL is a valid origin");

    let cors = CorsLayer::new()
        .allow_origin(frontend_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    Router::new()
        .route("/", get(routes::index))
        // Universal authenticate endpoint for provider redirect URLs.
        .route("/authenticate", get(routes::authenticate::authenticate))
        // Email magic links.
        .route("/magic-links/invite", post(routes::magic_links::invite))
        .route(
            "/magic-links/login-signup",
            post(routes::magic_links::login_or_signup),
        )
        .route(
            "/magic-links/email/discovery/send",
            post(routes::magic_links::discovery_send),
        )
        // Organization discovery.
        .route(
            "/discovery/organizations",
            get(routes::discovery::list_organizations),
        )
        .route(
            "/discovery/organizations/create",
            post(routes::discovery::create_organization),
        )
        // Sessions.
        .route("/sessions/exchange", post(routes::session::exchange))
        .route("/session", get(routes::session::get_current_session))
        .route("/logout", post(routes::session::logout))
        // Tasks over the browser-cookie transport.
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/{id}/complete",
            post(routes::tasks::complete_task),
        )
        .route("/tasks/{id}", delete(routes::tasks::delete_task))
        // The same task operations over the bearer transport.
        .route(
            "/agent/tasks",
            get(routes::tasks::agent_list_tasks).post(routes::tasks::agent_create_task),
        )
        .route(
            "/agent/tasks/{id}/complete",
            post(routes::tasks::agent_complete_task),
        )
        .route(
            "/agent/tasks/{id}",
            delete(routes::tasks::agent_delete_task),
        )
        // Operational endpoints.
        .route("/api/healthcheck", get(routes::health::healthcheck))
        .route(
            "/.well-known/oauth-authorization-server",
            get(routes::well_known::oauth_authorization_server),
        )
        .route(
            "/.well-known/oauth-protected-resource",
            get(routes::well_known::oauth_protected_resource),
        )
        .route(
            "/.well-known/oauth-protected-resource/{*rest}",
            get(routes::well_known::oauth_protected_resource),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
