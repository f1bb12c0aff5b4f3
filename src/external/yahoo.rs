use crate::external::quote_provider::{ExternalQuote, QuoteProvider, QuoteProviderError};
use async_trait::async_trait;
use serde::Deserialize;

pub struct YahooQuoteProvider {
    client: reqwest::Client,
}

impl YahooQuoteProvider {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

// Minimal response structs (only what we need)
#[derive(Debug, Deserialize)]
struct YahooQuoteEnvelope {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteResponse,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    result: Option<Vec<YahooQuoteResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResult {
    symbol: String,
    #[serde(rename = "shortName")]
    short_name: Option<String>,
    #[serde(rename = "longName")]
    long_name: Option<String>,
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    async fn lookup(&self, symbol: &str) -> Result<ExternalQuote, QuoteProviderError> {
        let url = "https://query1.finance.yahoo.com/v7/finance/quote";

        let resp = self
            .client
            .get(url)
            .query(&[("symbols", symbol)])
            .send()
            .await
            .map_err(|e| QuoteProviderError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(QuoteProviderError::RateLimited);
        }

        let body = resp
            .json::<YahooQuoteEnvelope>()
            .await
            .map_err(|e| QuoteProviderError::Parse(e.to_string()))?;

        if let Some(err) = body.quote_response.error {
            return Err(QuoteProviderError::BadResponse(err.to_string()));
        }

        let result = body
            .quote_response
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| QuoteProviderError::UnknownSymbol(symbol.to_string()))?;

        let price = result
            .regular_market_price
            .ok_or_else(|| QuoteProviderError::BadResponse("missing market price".into()))?;

        let name = result
            .short_name
            .or(result.long_name)
            .unwrap_or_else(|| result.symbol.clone());

        Ok(ExternalQuote { symbol: result.symbol, name, price })
    }
}
