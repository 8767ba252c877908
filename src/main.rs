//! Server binary: loads config, connects and migrates the database, serves the API.

use bookshelf_api::auth::{Argon2Params, TokenIssuer};
use bookshelf_api::{
    app, apply_migrations, ensure_database_exists, AppConfig, AppState, PgStore, RouterLimits,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookshelf_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let options = config.database.connect_options()?;
    ensure_database_exists(&options).await?;
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(options)
        .await?;
    apply_migrations(&pool).await?;

    let tokens = TokenIssuer::new(&config.jwt_secret, config.token_ttl());
    let state = AppState::new(Arc::new(PgStore::new(pool)), tokens, Argon2Params::default());
    let router = app(
        state,
        RouterLimits {
            request_timeout: config.request_timeout,
            body_limit: config.body_limit,
        },
    );

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("shutting down the server");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
