use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

// One executed order. Rows are append-only: shares are signed (positive =
// buy, negative = sell) and the ledger is the sole source of truth for
// holdings. Corrections take compensating entries, never edits.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Transaction {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub symbol: String,
    pub shares: i64,
    pub price_cents: i64,
    pub executed_at: chrono::DateTime<chrono::Utc>,
}

impl Transaction {
    pub fn new(user_id: uuid::Uuid, symbol: String, shares: i64, price_cents: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            user_id,
            symbol,
            shares,
            price_cents,
            executed_at: chrono::Utc::now(),
        }
    }
}

/// Raw order input as submitted by the client. Shares arrive as an arbitrary
/// JSON value so decimals and garbage reject explicitly rather than being
/// truncated by deserialization.
#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    pub symbol: Option<String>,
    pub shares: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderReceipt {
    pub transaction: Transaction,
    pub cash_cents: i64,
}
