use serde::Serialize;

// A live quote, fetched fresh for every request that needs one. Valuations
// therefore reflect price-at-view-time, not price-at-trade-time.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub price_cents: i64,
}
