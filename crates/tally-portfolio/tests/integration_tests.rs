//! Integration tests for tally-portfolio.
//!
//! These tests verify end-to-end valuation cycles over a realistic
//! multi-account book, including partial quote failures and the fetch
//! pattern across the three views.

use std::cell::RefCell;
use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use tally_ext_file::StaticQuoteSource;
use tally_portfolio::prelude::*;

// =============================================================================
// TEST FIXTURES
// =============================================================================

/// A two-account book with a ticker held in both accounts and two lots of
/// the same ticker in one account.
fn create_household_book() -> Vec<Holding> {
    let rows = [
        ("Brokerage", "AAPL", dec!(10), dec!(100)),
        ("Brokerage", "VTI", dec!(20), dec!(200)),
        ("Brokerage", "VTI", dec!(5), dec!(215)), // second lot
        ("IRA", "AAPL", dec!(5), dec!(120)),
        ("IRA", "MSFT", dec!(4), dec!(300)),
        ("IRA", "BND", dec!(30), dec!(75)),
    ];

    rows.iter()
        .map(|(account, ticker, shares, price)| {
            Holding::builder()
                .account(*account)
                .ticker(*ticker)
                .shares(*shares)
                .purchase_price(*price)
                .build()
                .unwrap()
        })
        .collect()
}

fn market() -> StaticQuoteSource {
    StaticQuoteSource::new()
        .with_price("AAPL", dec!(150))
        .with_price("VTI", dec!(250))
        .with_price("MSFT", dec!(400))
        .with_price("BND", dec!(72.50))
}

/// Wraps a source and counts fetches per ticker.
struct CountingSource<S> {
    inner: S,
    counts: RefCell<HashMap<Ticker, usize>>,
}

impl<S: QuoteSource> CountingSource<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            counts: RefCell::new(HashMap::new()),
        }
    }

    fn count(&self, ticker: &str) -> usize {
        self.counts
            .borrow()
            .get(&Ticker::new(ticker))
            .copied()
            .unwrap_or(0)
    }

    fn total(&self) -> usize {
        self.counts.borrow().values().sum()
    }
}

impl<S: QuoteSource> QuoteSource for CountingSource<S> {
    fn name(&self) -> &str {
        "counting"
    }

    fn get_price(&self, ticker: &Ticker) -> Result<Option<Decimal>, QuoteError> {
        *self.counts.borrow_mut().entry(ticker.clone()).or_insert(0) += 1;
        self.inner.get_price(ticker)
    }
}

// =============================================================================
// END-TO-END CYCLES
// =============================================================================

#[test]
fn test_full_snapshot_over_household_book() {
    let holdings = create_household_book();
    let snapshot = compute_snapshot(&holdings, &market());

    assert!(snapshot.is_complete());
    assert_eq!(snapshot.holdings.len(), 6);
    assert_eq!(snapshot.symbols.len(), 4);

    // Per-holding: first row is Brokerage AAPL 10 @ 100, quoted 150.
    let first = snapshot.holdings[0].state.value().unwrap();
    assert_eq!(first.current_value, dec!(1500.00));
    assert_eq!(first.gain_loss, dec!(500.00));
    assert_eq!(first.gain_percent, dec!(50.00));

    // Per-symbol: AAPL across both accounts.
    let aapl = snapshot.symbol(&Ticker::new("AAPL")).unwrap();
    assert_eq!(aapl.holding_count, 2);
    let aapl = aapl.state.value().unwrap();
    assert_eq!(aapl.total_shares, dec!(15));
    assert_eq!(aapl.total_purchase_value, dec!(1600.00));
    assert_eq!(aapl.current_value, dec!(2250.00));
    assert_eq!(aapl.account_breakdown["Brokerage"], dec!(10));
    assert_eq!(aapl.account_breakdown["IRA"], dec!(5));

    // Per-symbol: the two VTI lots are one symbol in one account.
    let vti = snapshot.symbol(&Ticker::new("VTI")).unwrap();
    assert_eq!(vti.holding_count, 2);
    let vti = vti.state.value().unwrap();
    assert_eq!(vti.total_shares, dec!(25));
    assert_eq!(vti.account_breakdown.len(), 1);
    assert_eq!(vti.account_breakdown["Brokerage"], dec!(25));

    // Portfolio totals.
    // AAPL 15x150 + VTI 25x250 + MSFT 4x400 + BND 30x72.50
    // = 2250 + 6250 + 1600 + 2175 = 12275
    assert_eq!(snapshot.portfolio.total_current_value, dec!(12275.00));
    // 1000 + 4000 + 1075 + 600 + 1200 + 2250 = 10125
    assert_eq!(snapshot.portfolio.total_purchase_value, dec!(10125.00));
    assert_eq!(snapshot.portfolio.total_gain_loss, dec!(2150.00));
    // 2150 / 10125 * 100 = 21.2345...
    assert_eq!(snapshot.portfolio.total_gain_percent, dec!(21.23));

    assert_eq!(
        snapshot.portfolio.ticker_breakdown[&Ticker::new("VTI")],
        dec!(6250.00)
    );
    assert_eq!(
        snapshot.portfolio.ticker_breakdown[&Ticker::new("BND")],
        dec!(2175.00)
    );
}

#[test]
fn test_symbols_follow_first_seen_order() {
    let holdings = create_household_book();
    let snapshot = compute_snapshot(&holdings, &market());

    let order: Vec<&str> = snapshot.symbols.iter().map(|s| s.ticker.as_str()).collect();
    assert_eq!(order, vec!["AAPL", "VTI", "MSFT", "BND"]);
}

// =============================================================================
// FETCH ACCOUNTING
// =============================================================================

#[test]
fn test_snapshot_fetch_pattern() {
    // 6 holdings, 4 distinct tickers: one fetch per holding for the
    // holding view, one per distinct ticker for the symbol view, and one
    // per holding again for the portfolio view. 2 x 6 + 4 = 16.
    let holdings = create_household_book();
    let source = CountingSource::new(market());

    compute_snapshot(&holdings, &source);

    assert_eq!(source.total(), 16);
    // AAPL: 2 holding rows + 1 symbol + 2 portfolio rows.
    assert_eq!(source.count("AAPL"), 5);
    // MSFT: 1 + 1 + 1.
    assert_eq!(source.count("MSFT"), 3);
}

#[test]
fn test_views_fetch_independently() {
    // A source whose price moves between fetches makes the views disagree.
    // That is accepted behavior: the views never share quotes.
    struct DriftingSource {
        calls: RefCell<i64>,
    }

    impl QuoteSource for DriftingSource {
        fn name(&self) -> &str {
            "drifting"
        }

        fn get_price(&self, _ticker: &Ticker) -> Result<Option<Decimal>, QuoteError> {
            let mut calls = self.calls.borrow_mut();
            *calls += 1;
            Ok(Some(dec!(100) + Decimal::from(*calls)))
        }
    }

    let holdings = vec![Holding::builder()
        .account("Brokerage")
        .ticker("AAPL")
        .shares(dec!(10))
        .purchase_price(dec!(100))
        .build()
        .unwrap()];

    let source = DriftingSource {
        calls: RefCell::new(0),
    };
    let snapshot = compute_snapshot(&holdings, &source);

    let holding_value = snapshot.holdings[0].state.value().unwrap().current_value;
    let symbol_value = snapshot.symbols[0].state.value().unwrap().current_value;
    let portfolio_value = snapshot.portfolio.total_current_value;

    // Fetch 1 priced the holding at 101, fetch 2 the symbol at 102,
    // fetch 3 the portfolio at 103.
    assert_eq!(holding_value, dec!(1010.00));
    assert_eq!(symbol_value, dec!(1020.00));
    assert_eq!(portfolio_value, dec!(1030.00));
}

// =============================================================================
// PARTIAL FAILURE
// =============================================================================

#[test]
fn test_one_bad_ticker_never_poisons_the_cycle() {
    let holdings = create_household_book();
    let source = StaticQuoteSource::new()
        .with_price("AAPL", dec!(150))
        .with_price("VTI", dec!(250))
        .with_price("BND", dec!(72.50))
        .with_failure("MSFT");

    let snapshot = compute_snapshot(&holdings, &source);

    assert!(!snapshot.is_complete());

    // The MSFT holding and symbol are marked unavailable, not dropped.
    let msft_row = snapshot
        .holdings
        .iter()
        .find(|h| h.ticker.as_str() == "MSFT")
        .unwrap();
    assert_eq!(msft_row.state.reason(), Some(UnavailableReason::FetchFailed));
    assert!(snapshot
        .symbol(&Ticker::new("MSFT"))
        .unwrap()
        .state
        .is_unavailable());

    // Every other holding still priced.
    let priced_rows = snapshot
        .holdings
        .iter()
        .filter(|h| h.state.is_priced())
        .count();
    assert_eq!(priced_rows, 5);

    // Portfolio totals exclude MSFT entirely: 12275 - 1600.
    assert_eq!(snapshot.portfolio.total_current_value, dec!(10675.00));
    assert_eq!(snapshot.portfolio.priced_count, 5);
    assert_eq!(snapshot.portfolio.skipped_count(), 1);
    assert!(!snapshot
        .portfolio
        .ticker_breakdown
        .contains_key(&Ticker::new("MSFT")));
}

#[test]
fn test_missing_quote_and_failed_fetch_surface_distinct_reasons() {
    let holdings = vec![
        Holding::builder()
            .account("A")
            .ticker("GONE")
            .shares(dec!(1))
            .purchase_price(dec!(1))
            .build()
            .unwrap(),
        Holding::builder()
            .account("A")
            .ticker("DOWN")
            .shares(dec!(1))
            .purchase_price(dec!(1))
            .build()
            .unwrap(),
    ];
    let source = StaticQuoteSource::new().with_failure("DOWN");

    let snapshot = compute_snapshot(&holdings, &source);

    assert_eq!(
        snapshot.holdings[0].state.reason(),
        Some(UnavailableReason::NoPrice)
    );
    assert_eq!(
        snapshot.holdings[1].state.reason(),
        Some(UnavailableReason::FetchFailed)
    );
    // Both are excluded from the totals the same way.
    assert_eq!(snapshot.portfolio.priced_count, 0);
    assert_eq!(snapshot.portfolio.total_current_value, Decimal::ZERO);
}

// =============================================================================
// SERIALIZATION
// =============================================================================

#[test]
fn test_snapshot_serializes_for_display_layer() {
    let holdings = create_household_book();
    let snapshot = compute_snapshot(&holdings, &market());

    let json = serde_json::to_value(&snapshot).unwrap();

    // Ticker map keys serialize as plain strings; decimals as numbers
    // (the workspace enables rust_decimal's serde-float).
    assert_eq!(
        json["portfolio"]["ticker_breakdown"]["AAPL"].as_f64(),
        Some(2250.0)
    );
    assert_eq!(json["portfolio"]["priced_count"], serde_json::json!(6));

    let back: PortfolioSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, snapshot);
}
