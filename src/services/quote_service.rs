use tracing::warn;

use crate::errors::AppError;
use crate::external::quote_provider::{QuoteProvider, QuoteProviderError};
use crate::models::Quote;

/// Convert a provider price in dollars to integer cents.
pub fn to_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Resolve one symbol against the live provider. Provider failures other
/// than rate limiting surface as "invalid symbol"; there is no retry.
pub async fn lookup(provider: &dyn QuoteProvider, raw_symbol: &str) -> Result<Quote, AppError> {
    let symbol = normalize_symbol(raw_symbol);
    if symbol.is_empty() {
        return Err(AppError::Validation("missing symbol".into()));
    }

    match provider.lookup(&symbol).await {
        Ok(quote) => Ok(Quote {
            symbol: quote.symbol,
            name: quote.name,
            price_cents: to_cents(quote.price),
        }),
        Err(QuoteProviderError::RateLimited) => Err(AppError::RateLimited),
        Err(e) => {
            warn!("Quote lookup failed for {}: {}", symbol, e);
            Err(AppError::Validation("invalid symbol".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_cents_rounds_half_up() {
        assert_eq!(to_cents(150.0), 15_000);
        assert_eq!(to_cents(150.005), 15_001);
        assert_eq!(to_cents(0.994), 99);
        assert_eq!(to_cents(0.995), 100);
    }

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(normalize_symbol("  aapl "), "AAPL");
        assert_eq!(normalize_symbol("Nflx"), "NFLX");
        assert_eq!(normalize_symbol("   "), "");
    }
}
