//! Whole-portfolio aggregation across all holdings.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use tally_quotes::{QuoteSource, Ticker};

use crate::types::Holding;
use crate::valuation::{gain_percent, round_money};

/// Valuation totals across every holding in the portfolio.
///
/// Holdings whose quote could not be obtained are excluded from every sum
/// and from the breakdown; they are counted only by
/// `holding_count - priced_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAggregate {
    /// Total current market value over priced holdings, rounded to 2 dp.
    pub total_current_value: Decimal,
    /// Total cost basis over priced holdings, rounded to 2 dp.
    pub total_purchase_value: Decimal,
    /// Total gain/loss over priced holdings, rounded to 2 dp.
    pub total_gain_loss: Decimal,
    /// Gain/loss as a percentage of the purchase value, rounded to 2 dp.
    /// Zero when the total purchase value is zero.
    pub total_gain_percent: Decimal,
    /// Current value per ticker over priced holdings, rounded to 2 dp.
    pub ticker_breakdown: HashMap<Ticker, Decimal>,
    /// Number of holdings seen.
    pub holding_count: usize,
    /// Number of holdings whose quote fetch succeeded.
    pub priced_count: usize,
}

impl PortfolioAggregate {
    /// Number of holdings excluded because no price could be obtained.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.holding_count - self.priced_count
    }

    /// Returns true if every holding contributed to the totals.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.priced_count == self.holding_count
    }
}

/// Aggregates the whole portfolio, fetching one quote per holding.
///
/// Fetches are not deduplicated: two holdings of the same ticker incur two
/// fetches, which may return different prices within one call. A holding
/// whose fetch fails or returns no price is skipped entirely, never counted
/// as zero. An empty or fully-skipped portfolio yields the zero aggregate.
pub fn aggregate_portfolio(holdings: &[Holding], source: &dyn QuoteSource) -> PortfolioAggregate {
    let mut total_current_value = Decimal::ZERO;
    let mut total_purchase_value = Decimal::ZERO;
    let mut ticker_values: HashMap<Ticker, Decimal> = HashMap::new();
    let mut priced_count = 0usize;

    for holding in holdings {
        let price = match source.get_price(&holding.ticker) {
            Ok(Some(price)) => price,
            Ok(None) => {
                debug!(
                    "No price for {} in {} (source {}), excluding from totals",
                    holding.ticker,
                    holding.account,
                    source.name()
                );
                continue;
            }
            Err(e) => {
                warn!(
                    "Failed to fetch price for {} in {} (source {}), excluding from totals: {}",
                    holding.ticker,
                    holding.account,
                    source.name(),
                    e
                );
                continue;
            }
        };

        let current_value = price * holding.shares;
        total_current_value += current_value;
        total_purchase_value += holding.purchase_value();
        priced_count += 1;

        *ticker_values
            .entry(holding.ticker.clone())
            .or_insert(Decimal::ZERO) += current_value;
    }

    let total_gain_loss = total_current_value - total_purchase_value;
    let pct = gain_percent(total_gain_loss, total_purchase_value);

    let ticker_breakdown: HashMap<Ticker, Decimal> = ticker_values
        .into_iter()
        .map(|(ticker, value)| (ticker, round_money(value)))
        .collect();

    let aggregate = PortfolioAggregate {
        total_current_value: round_money(total_current_value),
        total_purchase_value: round_money(total_purchase_value),
        total_gain_loss: round_money(total_gain_loss),
        total_gain_percent: round_money(pct),
        ticker_breakdown,
        holding_count: holdings.len(),
        priced_count,
    };

    info!(
        "Portfolio totals: value={}, gain={} ({}%), {}/{} holdings priced",
        aggregate.total_current_value,
        aggregate.total_gain_loss,
        aggregate.total_gain_percent,
        aggregate.priced_count,
        aggregate.holding_count
    );

    aggregate
}
