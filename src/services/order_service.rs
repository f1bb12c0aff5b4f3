use serde_json::Value;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::external::quote_provider::QuoteProvider;
use crate::models::{OrderReceipt, OrderRequest, Side, Transaction};
use crate::services::quote_service;

// An order moves Received -> Validated -> Priced -> Applied, or drops out as
// a rejection at any step. Rejections never touch the store, so resubmitting
// a bad order is harmless.

#[derive(Debug)]
struct ValidatedOrder {
    symbol: String,
    shares: i64,
}

#[derive(Debug)]
struct PricedOrder {
    symbol: String,
    shares: i64,
    price_cents: i64,
    cost_cents: i64,
}

enum ShareCountError {
    NotAnInteger,
    NotPositive,
}

/// Share counts arrive as arbitrary JSON. Integers (numeric or string form)
/// are accepted; decimals and garbage reject rather than truncate.
fn parse_share_count(value: &Value) -> Result<i64, ShareCountError> {
    let shares = match value {
        Value::Number(n) => n.as_i64().ok_or(ShareCountError::NotAnInteger)?,
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ShareCountError::NotAnInteger)?,
        _ => return Err(ShareCountError::NotAnInteger),
    };
    if shares <= 0 {
        return Err(ShareCountError::NotPositive);
    }
    Ok(shares)
}

fn validate(request: &OrderRequest, side: Side) -> Result<ValidatedOrder, AppError> {
    let symbol = request
        .symbol
        .as_deref()
        .map(quote_service::normalize_symbol)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("missing symbol".into()))?;

    let raw_shares = request
        .shares
        .as_ref()
        .filter(|v| !v.is_null() && v.as_str().map_or(true, |s| !s.trim().is_empty()))
        .ok_or_else(|| AppError::Validation("missing shares".into()))?;

    let shares = parse_share_count(raw_shares).map_err(|e| {
        let reason = match (side, e) {
            (Side::Buy, _) => "invalid number of shares",
            (Side::Sell, ShareCountError::NotPositive) => "shares must be positive",
            (Side::Sell, ShareCountError::NotAnInteger) => "shares must be an integer",
        };
        AppError::Validation(reason.into())
    })?;

    Ok(ValidatedOrder { symbol, shares })
}

async fn price(
    pool: &PgPool,
    provider: &dyn QuoteProvider,
    user_id: Uuid,
    side: Side,
    order: ValidatedOrder,
) -> Result<PricedOrder, AppError> {
    let quote = quote_service::lookup(provider, &order.symbol).await?;

    if side == Side::Sell {
        let held = db::transaction_queries::net_shares(pool, user_id, &order.symbol).await?;
        if held < order.shares {
            return Err(AppError::Business("too many shares".into()));
        }
    }

    let cost_cents = order
        .shares
        .checked_mul(quote.price_cents)
        .ok_or_else(|| AppError::Validation("invalid number of shares".into()))?;

    Ok(PricedOrder {
        symbol: order.symbol,
        shares: order.shares,
        price_cents: quote.price_cents,
        cost_cents,
    })
}

/// Apply the priced order: one balance update plus one ledger append, in a
/// single database transaction. The user row is locked first, so concurrent
/// orders for the same user serialize and the cash/net-shares checks hold at
/// commit time. Different users never contend.
async fn apply(
    pool: &PgPool,
    user_id: Uuid,
    side: Side,
    order: PricedOrder,
) -> Result<OrderReceipt, AppError> {
    let mut tx = pool.begin().await?;

    let cash = db::user_queries::fetch_cash_for_update(&mut tx, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".into()))?;

    let (signed_shares, delta_cents) = match side {
        Side::Buy => {
            if order.cost_cents > cash {
                return Err(AppError::Business("can't afford".into()));
            }
            (order.shares, -order.cost_cents)
        }
        Side::Sell => {
            let held =
                db::transaction_queries::net_shares(&mut *tx, user_id, &order.symbol).await?;
            if held < order.shares {
                return Err(AppError::Business("too many shares".into()));
            }
            (-order.shares, order.cost_cents)
        }
    };

    db::user_queries::adjust_cash(&mut tx, user_id, delta_cents).await?;

    let record = Transaction::new(
        user_id,
        order.symbol.clone(),
        signed_shares,
        order.price_cents,
    );
    db::transaction_queries::append(&mut tx, &record).await?;

    tx.commit().await.map_err(|e| {
        error!("Failed to commit order for user {}: {}", user_id, e);
        AppError::Db(e)
    })?;

    info!(
        "Applied {:?} order for user {}: {} x {} @ {} cents",
        side, user_id, order.symbol, order.shares, order.price_cents
    );

    Ok(OrderReceipt {
        transaction: record,
        cash_cents: cash + delta_cents,
    })
}

pub async fn place_order(
    pool: &PgPool,
    provider: &dyn QuoteProvider,
    user_id: Uuid,
    side: Side,
    request: OrderRequest,
) -> Result<OrderReceipt, AppError> {
    let validated = validate(&request, side)?;
    let priced = price(pool, provider, user_id, side, validated).await?;
    apply(pool, user_id, side, priced).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(symbol: Option<&str>, shares: Option<Value>) -> OrderRequest {
        OrderRequest {
            symbol: symbol.map(str::to_string),
            shares,
        }
    }

    fn reason(err: AppError) -> String {
        err.reason()
    }

    #[test]
    fn missing_symbol_rejected() {
        let err = validate(&request(None, Some(json!(1))), Side::Buy).unwrap_err();
        assert_eq!(reason(err), "missing symbol");

        let err = validate(&request(Some("   "), Some(json!(1))), Side::Buy).unwrap_err();
        assert_eq!(reason(err), "missing symbol");
    }

    #[test]
    fn missing_shares_rejected() {
        let err = validate(&request(Some("AAPL"), None), Side::Buy).unwrap_err();
        assert_eq!(reason(err), "missing shares");

        let err = validate(&request(Some("AAPL"), Some(json!(""))), Side::Sell).unwrap_err();
        assert_eq!(reason(err), "missing shares");

        let err = validate(&request(Some("AAPL"), Some(Value::Null)), Side::Buy).unwrap_err();
        assert_eq!(reason(err), "missing shares");
    }

    #[test]
    fn decimal_shares_rejected_not_truncated() {
        let err = validate(&request(Some("AAPL"), Some(json!(2.5))), Side::Buy).unwrap_err();
        assert_eq!(reason(err), "invalid number of shares");

        let err = validate(&request(Some("AAPL"), Some(json!("2.5"))), Side::Sell).unwrap_err();
        assert_eq!(reason(err), "shares must be an integer");
    }

    #[test]
    fn garbage_shares_rejected() {
        let err = validate(&request(Some("AAPL"), Some(json!("ten"))), Side::Buy).unwrap_err();
        assert_eq!(reason(err), "invalid number of shares");

        let err = validate(&request(Some("AAPL"), Some(json!(true))), Side::Sell).unwrap_err();
        assert_eq!(reason(err), "shares must be an integer");
    }

    #[test]
    fn non_positive_shares_rejected() {
        for bad in [json!(0), json!(-3), json!("-3")] {
            let err = validate(&request(Some("AAPL"), Some(bad.clone())), Side::Buy).unwrap_err();
            assert_eq!(reason(err), "invalid number of shares");

            let err = validate(&request(Some("AAPL"), Some(bad)), Side::Sell).unwrap_err();
            assert_eq!(reason(err), "shares must be positive");
        }
    }

    #[test]
    fn valid_input_normalizes_symbol() {
        let order = validate(&request(Some("  aapl "), Some(json!("10"))), Side::Buy).unwrap();
        assert_eq!(order.symbol, "AAPL");
        assert_eq!(order.shares, 10);

        let order = validate(&request(Some("NFLX"), Some(json!(5))), Side::Sell).unwrap();
        assert_eq!(order.symbol, "NFLX");
        assert_eq!(order.shares, 5);
    }
}
