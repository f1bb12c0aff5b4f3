use serde::Serialize;
use sqlx::FromRow;

// Net position in one symbol, derived from the ledger at read time. Never
// persisted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Holding {
    pub symbol: String,
    pub shares: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Quoted,
    Unavailable,
}

/// One portfolio row at view time. A holding whose quote fetch failed keeps
/// its shares visible but carries no price or value and is excluded from the
/// grand total.
#[derive(Debug, Clone, Serialize)]
pub struct HoldingValuation {
    pub symbol: String,
    pub shares: i64,
    pub price_cents: Option<i64>,
    pub value_cents: Option<i64>,
    pub quote_status: QuoteStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioValuation {
    pub cash_cents: i64,
    pub holdings: Vec<HoldingValuation>,
    pub grand_total_cents: i64,
}
