use crate::external::quote_provider::{ExternalQuote, QuoteProvider, QuoteProviderError};
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Network-free provider for development and demos. Each ticker gets a
/// stable base price derived from its name, with a small random wobble per
/// lookup so consecutive quotes move like a market would.
pub struct StubQuoteProvider;

impl StubQuoteProvider {
    pub fn new() -> Self {
        Self
    }

    fn base_price(symbol: &str) -> f64 {
        let mut hasher = DefaultHasher::new();
        symbol.hash(&mut hasher);
        20.0 + (hasher.finish() % 48_000) as f64 / 100.0
    }
}

#[async_trait]
impl QuoteProvider for StubQuoteProvider {
    async fn lookup(&self, symbol: &str) -> Result<ExternalQuote, QuoteProviderError> {
        if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphabetic() || c == '.') {
            return Err(QuoteProviderError::UnknownSymbol(symbol.to_string()));
        }

        let base = Self::base_price(symbol);
        let price = base * (1.0 + (rand::random::<f64>() - 0.5) * 0.02);

        Ok(ExternalQuote {
            symbol: symbol.to_string(),
            name: format!("{symbol} (simulated)"),
            price: (price * 100.0).round() / 100.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stable_symbol_stays_in_its_neighborhood() {
        let provider = StubQuoteProvider::new();
        let first = provider.lookup("AAPL").await.unwrap();
        let second = provider.lookup("AAPL").await.unwrap();
        // Same base, at most ±1% wobble each.
        assert!((first.price - second.price).abs() / first.price < 0.05);
    }

    #[tokio::test]
    async fn garbage_symbol_is_unknown() {
        let provider = StubQuoteProvider::new();
        assert!(matches!(
            provider.lookup("NOT A TICKER!").await,
            Err(QuoteProviderError::UnknownSymbol(_))
        ));
    }
}
