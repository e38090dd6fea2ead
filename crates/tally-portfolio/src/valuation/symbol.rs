//! Per-symbol aggregation across accounts.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use tally_quotes::{QuoteSource, Ticker};

use crate::types::Holding;
use crate::valuation::{gain_percent, round_money, UnavailableReason, ValuationState};

/// Computed figures for one priced symbol aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolValue {
    /// Current price per share, as returned by the source (unrounded).
    pub price: Decimal,
    /// Shares held across all accounts (unrounded).
    pub total_shares: Decimal,
    /// Cost basis summed across all accounts, rounded to 2 dp.
    pub total_purchase_value: Decimal,
    /// Current market value (price x total shares), rounded to 2 dp.
    pub current_value: Decimal,
    /// Current value minus total purchase value, rounded to 2 dp.
    pub gain_loss: Decimal,
    /// Gain/loss as a percentage of the purchase value, rounded to 2 dp.
    /// Zero when the total purchase value is zero.
    pub gain_percent: Decimal,
    /// Shares per account (unrounded). Accounts appear as encountered.
    pub account_breakdown: HashMap<String, Decimal>,
}

/// Valuation result for all holdings of one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolAggregate {
    /// Ticker symbol.
    pub ticker: Ticker,
    /// Number of holding rows aggregated.
    pub holding_count: usize,
    /// Computed figures, or unavailable with a reason.
    pub state: ValuationState<SymbolValue>,
}

/// Aggregates all holdings of one ticker against a single fresh quote.
///
/// The caller is responsible for the grouping: `holdings` must be the rows
/// for `ticker`, and the function sums them as given. One quote is fetched
/// and shared across the rows; if it is missing or the fetch fails, the
/// whole aggregate is unavailable and no sums are computed.
pub fn aggregate_symbol(
    ticker: &Ticker,
    holdings: &[Holding],
    source: &dyn QuoteSource,
) -> SymbolAggregate {
    let state = match source.get_price(ticker) {
        Ok(Some(price)) => {
            let mut total_shares = Decimal::ZERO;
            let mut total_purchase_value = Decimal::ZERO;
            let mut account_breakdown: HashMap<String, Decimal> = HashMap::new();

            for holding in holdings {
                total_shares += holding.shares;
                total_purchase_value += holding.purchase_value();
                *account_breakdown
                    .entry(holding.account.clone())
                    .or_insert(Decimal::ZERO) += holding.shares;
            }

            let current_value = price * total_shares;
            let gain_loss = current_value - total_purchase_value;
            let pct = gain_percent(gain_loss, total_purchase_value);

            ValuationState::Priced(SymbolValue {
                price,
                total_shares,
                total_purchase_value: round_money(total_purchase_value),
                current_value: round_money(current_value),
                gain_loss: round_money(gain_loss),
                gain_percent: round_money(pct),
                account_breakdown,
            })
        }
        Ok(None) => {
            debug!("No price for symbol {} (source {})", ticker, source.name());
            ValuationState::Unavailable(UnavailableReason::NoPrice)
        }
        Err(e) => {
            warn!(
                "Failed to fetch price for symbol {} (source {}): {}",
                ticker,
                source.name(),
                e
            );
            ValuationState::Unavailable(UnavailableReason::FetchFailed)
        }
    };

    SymbolAggregate {
        ticker: ticker.clone(),
        holding_count: holdings.len(),
        state,
    }
}
