use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A live quote as returned by an external provider, priced in dollars.
/// Conversion to integer cents happens at the service boundary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExternalQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Error)]
pub enum QuoteProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("rate limited")]
    RateLimited,
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch a fresh quote for one symbol. Callers never cache the result;
    /// there is no retry or backoff.
    async fn lookup(&self, symbol: &str) -> Result<ExternalQuote, QuoteProviderError>;
}
