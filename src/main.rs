mod app;
mod auth;
mod db;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use crate::auth::AuthConfig;
use crate::external::quote_provider::QuoteProvider;
use crate::external::stub::StubQuoteProvider;
use crate::external::yahoo::YahooQuoteProvider;
use crate::logging::LoggingConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    logging::init_logging(LoggingConfig::from_env())?;

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    // Select quote provider based on QUOTE_PROVIDER env var (defaults to yahoo)
    let provider_name =
        std::env::var("QUOTE_PROVIDER").unwrap_or_else(|_| "yahoo".to_string());

    let provider: Arc<dyn QuoteProvider> = match provider_name.to_lowercase().as_str() {
        "yahoo" => {
            tracing::info!("📊 Using quote provider: Yahoo Finance");
            Arc::new(YahooQuoteProvider::new())
        }
        "stub" => {
            tracing::info!("📊 Using quote provider: offline stub");
            Arc::new(StubQuoteProvider::new())
        }
        _ => anyhow::bail!(
            "Invalid QUOTE_PROVIDER: {provider_name}. Must be 'yahoo' or 'stub'"
        ),
    };

    let auth = AuthConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let state = AppState {
        pool,
        quote_provider: provider,
        auth,
    };
    let app = app::create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 papertrade backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
