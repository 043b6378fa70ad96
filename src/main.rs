use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use watchlist_api::app::app;
use watchlist_api::auth::TokenVerifier;
use watchlist_api::config::AppConfig;
use watchlist_api::state::AppState;
use watchlist_api::store::{self, PgMovieStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env outside production so local runs pick up JWT_SECRET and
    // DATABASE_URL without exporting them by hand.
    if std::env::var("APP_ENV").as_deref() != Ok("production") {
        let _ = dotenvy::dotenv();
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;

    let pool = store::connect(&config.database_url)
        .await
        .context("connecting to postgres")?;
    tracing::info!("connected to postgres");

    let state = AppState::new(
        Arc::new(PgMovieStore::new(pool)),
        TokenVerifier::new(&config.jwt_secret),
    );
    let app = app(state, &config);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("watchlist API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;

    Ok(())
}
