use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::external::quote_provider::QuoteProvider;
use crate::models::{Holding, HoldingValuation, PortfolioValuation, QuoteStatus};
use crate::services::quote_service::to_cents;

/// Point-in-time valuation: active holdings from the ledger, each priced
/// with a fresh quote. A symbol whose quote fetch fails stays visible with
/// quote_status "unavailable" and does not count toward the grand total.
pub async fn valuation(
    pool: &PgPool,
    provider: &dyn QuoteProvider,
    user_id: Uuid,
) -> Result<PortfolioValuation, AppError> {
    let user = db::user_queries::fetch_one(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".into()))?;

    let holdings = db::transaction_queries::active_holdings(pool, user_id).await?;

    let mut prices = Vec::with_capacity(holdings.len());
    for holding in &holdings {
        match provider.lookup(&holding.symbol).await {
            Ok(quote) => prices.push(Some(to_cents(quote.price))),
            Err(e) => {
                warn!("Omitting {} from valuation total: {}", holding.symbol, e);
                prices.push(None);
            }
        }
    }

    Ok(project(user.cash_cents, holdings, prices))
}

fn project(
    cash_cents: i64,
    holdings: Vec<Holding>,
    prices: Vec<Option<i64>>,
) -> PortfolioValuation {
    let mut grand_total_cents = cash_cents;
    let rows = holdings
        .into_iter()
        .zip(prices)
        .map(|(holding, price_cents)| {
            let value_cents = price_cents.map(|p| holding.shares * p);
            if let Some(value) = value_cents {
                grand_total_cents += value;
            }
            HoldingValuation {
                symbol: holding.symbol,
                shares: holding.shares,
                price_cents,
                value_cents,
                quote_status: if price_cents.is_some() {
                    QuoteStatus::Quoted
                } else {
                    QuoteStatus::Unavailable
                },
            }
        })
        .collect();

    PortfolioValuation {
        cash_cents,
        holdings: rows,
        grand_total_cents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(symbol: &str, shares: i64) -> Holding {
        Holding { symbol: symbol.to_string(), shares }
    }

    #[test]
    fn total_is_cash_plus_quoted_values() {
        // 8500.00 cash + 10 AAPL @ 150.00 = 10000.00
        let valuation = project(850_000, vec![holding("AAPL", 10)], vec![Some(15_000)]);
        assert_eq!(valuation.grand_total_cents, 1_000_000);
        assert_eq!(valuation.holdings.len(), 1);
        assert_eq!(valuation.holdings[0].value_cents, Some(150_000));
        assert_eq!(valuation.holdings[0].quote_status, QuoteStatus::Quoted);
    }

    #[test]
    fn failed_quote_is_visible_but_excluded_from_total() {
        let valuation = project(
            100_000,
            vec![holding("AAPL", 10), holding("GME", 3)],
            vec![Some(15_000), None],
        );
        assert_eq!(valuation.grand_total_cents, 100_000 + 150_000);

        let gme = &valuation.holdings[1];
        assert_eq!(gme.symbol, "GME");
        assert_eq!(gme.shares, 3);
        assert_eq!(gme.price_cents, None);
        assert_eq!(gme.value_cents, None);
        assert_eq!(gme.quote_status, QuoteStatus::Unavailable);
    }

    #[test]
    fn empty_portfolio_is_just_cash() {
        let valuation = project(1_000_000, vec![], vec![]);
        assert_eq!(valuation.grand_total_cents, 1_000_000);
        assert!(valuation.holdings.is_empty());
    }
}
