//! Per-holding valuation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use tally_quotes::{QuoteSource, Ticker};

use crate::types::Holding;
use crate::valuation::{gain_percent, round_money, UnavailableReason, ValuationState};

/// Computed figures for one priced holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingValue {
    /// Current price per share, as returned by the source (unrounded).
    pub price: Decimal,
    /// Current market value (price x shares), rounded to 2 dp.
    pub current_value: Decimal,
    /// Cost basis (purchase price x shares), rounded to 2 dp.
    pub purchase_value: Decimal,
    /// Current value minus purchase value, rounded to 2 dp.
    pub gain_loss: Decimal,
    /// Gain/loss as a percentage of the purchase value, rounded to 2 dp.
    /// Zero when the purchase value is zero.
    pub gain_percent: Decimal,
}

/// Valuation result for a single holding.
///
/// The input fields are echoed back so the record is self-describing when
/// surfaced to a display or storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingValuation {
    /// Account the position is held in.
    pub account: String,
    /// Ticker symbol.
    pub ticker: Ticker,
    /// Shares held.
    pub shares: Decimal,
    /// Purchase price per share.
    pub purchase_price: Decimal,
    /// Computed figures, or unavailable with a reason.
    pub state: ValuationState<HoldingValue>,
}

impl HoldingValuation {
    /// Returns the display label, "{account} - {ticker}".
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.account, self.ticker)
    }
}

/// Values a single holding against a fresh quote.
///
/// A missing quote or a fetch failure yields an unavailable state; neither
/// is an error to the caller.
pub fn value_holding(holding: &Holding, source: &dyn QuoteSource) -> HoldingValuation {
    let state = match source.get_price(&holding.ticker) {
        Ok(Some(price)) => {
            let current_value = price * holding.shares;
            let purchase_value = holding.purchase_price * holding.shares;
            let gain_loss = current_value - purchase_value;
            let pct = gain_percent(gain_loss, purchase_value);

            ValuationState::Priced(HoldingValue {
                price,
                current_value: round_money(current_value),
                purchase_value: round_money(purchase_value),
                gain_loss: round_money(gain_loss),
                gain_percent: round_money(pct),
            })
        }
        Ok(None) => {
            debug!(
                "No price for {} in {} (source {})",
                holding.ticker,
                holding.account,
                source.name()
            );
            ValuationState::Unavailable(UnavailableReason::NoPrice)
        }
        Err(e) => {
            warn!(
                "Failed to fetch price for {} in {} (source {}): {}",
                holding.ticker,
                holding.account,
                source.name(),
                e
            );
            ValuationState::Unavailable(UnavailableReason::FetchFailed)
        }
    };

    HoldingValuation {
        account: holding.account.clone(),
        ticker: holding.ticker.clone(),
        shares: holding.shares,
        purchase_price: holding.purchase_price,
        state,
    }
}
