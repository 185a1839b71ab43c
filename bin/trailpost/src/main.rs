//! # trailpost binary
//!
//! The entry point that assembles the application: config, store, auth
//! provider, router.

use std::sync::Arc;

use chrono::Duration;
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use tp_api::AppState;
use tp_auth::TokenAuthProvider;
use tp_config::AppConfig;
use tp_db_sqlite::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 1. Configuration (defaults <- trailpost.toml <- TRAILPOST__* env)
    let config = AppConfig::load()?;

    // 2. Store: open the database and apply migrations
    let store = Arc::new(SqliteStore::connect(&config.database.url).await?);

    // 3. Auth provider
    let auth = TokenAuthProvider::new(
        config.auth.jwt_secret.expose_secret(),
        Duration::minutes(config.auth.token_ttl_minutes),
        &config.auth.issuer,
    );

    // 4. Wrap the ports in AppState (dynamic dispatch at the seams)
    let state = Arc::new(AppState {
        users: store.clone(),
        posts: store,
        auth: Arc::new(auth),
    });

    let app = tp_api::router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🚀 trailpost listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
