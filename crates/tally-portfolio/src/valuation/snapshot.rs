//! Whole-cycle snapshot combining all three views.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use tally_quotes::{QuoteSource, Ticker};

use crate::types::Holding;
use crate::valuation::{
    aggregate_portfolio, aggregate_symbol, value_holding, HoldingValuation, PortfolioAggregate,
    SymbolAggregate,
};

/// All three valuation views for one evaluation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// One valuation per holding, in input order.
    pub holdings: Vec<HoldingValuation>,
    /// One aggregate per distinct ticker, in first-seen order.
    pub symbols: Vec<SymbolAggregate>,
    /// The whole-portfolio aggregate.
    pub portfolio: PortfolioAggregate,
    /// When the snapshot was computed (unix millis).
    pub computed_at: i64,
}

impl PortfolioSnapshot {
    /// Looks up the aggregate for a ticker.
    #[must_use]
    pub fn symbol(&self, ticker: &Ticker) -> Option<&SymbolAggregate> {
        self.symbols.iter().find(|s| &s.ticker == ticker)
    }

    /// Returns true if every view obtained every price it asked for.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.portfolio.is_complete()
            && self.holdings.iter().all(|h| h.state.is_priced())
            && self.symbols.iter().all(|s| s.state.is_priced())
    }
}

/// Computes all three views for one evaluation cycle.
///
/// Each view performs its own fetches: N holdings with K distinct tickers
/// cost 2N + K fetches in total. The views may therefore disagree when the
/// source's prices move between fetches; callers wanting one price per
/// ticker per cycle should wrap their source in a caching decorator.
pub fn compute_snapshot(holdings: &[Holding], source: &dyn QuoteSource) -> PortfolioSnapshot {
    let holding_valuations: Vec<HoldingValuation> = holdings
        .iter()
        .map(|holding| value_holding(holding, source))
        .collect();

    // Group by ticker, preserving first-seen order.
    let mut ticker_order: Vec<Ticker> = Vec::new();
    let mut groups: HashMap<Ticker, Vec<Holding>> = HashMap::new();
    for holding in holdings {
        groups
            .entry(holding.ticker.clone())
            .or_insert_with(|| {
                ticker_order.push(holding.ticker.clone());
                Vec::new()
            })
            .push(holding.clone());
    }

    let symbols: Vec<SymbolAggregate> = ticker_order
        .iter()
        .map(|ticker| aggregate_symbol(ticker, &groups[ticker], source))
        .collect();

    let portfolio = aggregate_portfolio(holdings, source);

    let computed_at = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64;

    PortfolioSnapshot {
        holdings: holding_valuations,
        symbols,
        portfolio,
        computed_at,
    }
}
