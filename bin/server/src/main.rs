use brass_lantern_identity::StytchClient;
use brass_lantern_server::{app::app, auth::AppState, config::ServerConfig};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    // Create database connection pool
    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("failed to run migrations");

    // Construct the provider client. Missing credentials degrade to a
    // fail-closed gate rather than aborting: the health endpoint stays
    // reachable and reports what is missing.
    let identity = match StytchClient::new(config.stytch_config()) {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Stytch client unavailable; authenticated routes will reject all credentials"
            );
            None
        }
    };

    let addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState::new(db_pool, identity, config));
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
