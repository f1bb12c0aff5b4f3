/// Portfolio projection tests.
///
/// The projector aggregates the ledger into per-symbol net positions, prices
/// each one with a fresh quote, and totals cash plus quoted values. A symbol
/// whose quote is unavailable stays visible in the output but contributes
/// nothing to the total.

use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Fixture types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum QuoteStatus {
    Quoted,
    Unavailable,
}

#[derive(Debug, Clone)]
struct ValuationRow {
    symbol: String,
    shares: i64,
    price_cents: Option<i64>,
    value_cents: Option<i64>,
    status: QuoteStatus,
}

/// Scripted quote source: a fixed price per symbol, or None to simulate a
/// provider failure for that symbol.
struct ScriptedQuotes {
    prices: BTreeMap<&'static str, Option<i64>>,
}

impl ScriptedQuotes {
    fn lookup(&self, symbol: &str) -> Option<i64> {
        self.prices.get(symbol).copied().flatten()
    }
}

fn project(
    cash_cents: i64,
    holdings: &[(&str, i64)],
    quotes: &ScriptedQuotes,
) -> (Vec<ValuationRow>, i64) {
    let mut total = cash_cents;
    let rows = holdings
        .iter()
        .map(|(symbol, shares)| {
            let price_cents = quotes.lookup(symbol);
            let value_cents = price_cents.map(|p| shares * p);
            if let Some(value) = value_cents {
                total += value;
            }
            ValuationRow {
                symbol: symbol.to_string(),
                shares: *shares,
                price_cents,
                value_cents,
                status: if price_cents.is_some() {
                    QuoteStatus::Quoted
                } else {
                    QuoteStatus::Unavailable
                },
            }
        })
        .collect();
    (rows, total)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn total_is_cash_plus_value_of_quoted_holdings() {
    let quotes = ScriptedQuotes {
        prices: BTreeMap::from([("AAPL", Some(15_000)), ("NFLX", Some(40_000))]),
    };
    let (rows, total) = project(850_000, &[("AAPL", 10), ("NFLX", 2)], &quotes);

    assert_eq!(total, 850_000 + 150_000 + 80_000);
    assert!(rows.iter().all(|r| r.status == QuoteStatus::Quoted));
}

#[test]
fn unavailable_quote_is_reported_but_not_totaled() {
    let quotes = ScriptedQuotes {
        prices: BTreeMap::from([("AAPL", Some(15_000)), ("GME", None)]),
    };
    let (rows, total) = project(100_000, &[("AAPL", 10), ("GME", 3)], &quotes);

    // GME is understated out of the total rather than failing the request.
    assert_eq!(total, 100_000 + 150_000);

    let gme = rows.iter().find(|r| r.symbol == "GME").unwrap();
    assert_eq!(gme.status, QuoteStatus::Unavailable);
    assert_eq!(gme.shares, 3);
    assert_eq!(gme.price_cents, None);
    assert_eq!(gme.value_cents, None);
}

#[test]
fn all_quotes_failing_degrades_to_cash_only() {
    let quotes = ScriptedQuotes {
        prices: BTreeMap::from([("AAPL", None), ("GME", None)]),
    };
    let (rows, total) = project(420_000, &[("AAPL", 1), ("GME", 2)], &quotes);

    assert_eq!(total, 420_000);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.status == QuoteStatus::Unavailable));
}

#[test]
fn valuation_reflects_price_at_view_time() {
    // Bought at $150; the market has since moved to $180. The projector uses
    // the live price, not the trade price recorded in the ledger.
    let quotes = ScriptedQuotes {
        prices: BTreeMap::from([("AAPL", Some(18_000))]),
    };
    let (_, total) = project(850_000, &[("AAPL", 10)], &quotes);
    assert_eq!(total, 850_000 + 180_000);
}

// ---------------------------------------------------------------------------
// History ordering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct HistoryKey {
    executed_at_epoch: i64,
    seq: i64,
}

#[test]
fn history_orders_by_time_then_insertion() {
    let mut keys = vec![
        HistoryKey { executed_at_epoch: 200, seq: 7 },
        HistoryKey { executed_at_epoch: 100, seq: 3 },
        HistoryKey { executed_at_epoch: 200, seq: 5 },
        HistoryKey { executed_at_epoch: 100, seq: 1 },
    ];
    keys.sort();

    let order: Vec<(i64, i64)> = keys.iter().map(|k| (k.executed_at_epoch, k.seq)).collect();
    assert_eq!(order, vec![(100, 1), (100, 3), (200, 5), (200, 7)]);
}
