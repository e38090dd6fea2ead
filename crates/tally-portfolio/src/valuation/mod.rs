//! Valuation operations and result records.
//!
//! Three independent views are computed per evaluation cycle:
//!
//! - [`value_holding`]: one position in one account
//! - [`aggregate_symbol`]: all positions of one ticker, across accounts
//! - [`aggregate_portfolio`]: all positions, across tickers
//!
//! Each view fetches its own quotes through the caller's [`QuoteSource`]
//! and never caches: a ticker held by one account may be fetched up to
//! three times per cycle, and the views may disagree transiently when the
//! source returns different prices across those fetches.
//!
//! A fetch that fails or returns no price marks the affected unit
//! unavailable (holding/symbol level) or excludes it from the sums
//! (portfolio level); it never aborts sibling computations.
//!
//! [`QuoteSource`]: tally_quotes::QuoteSource

mod holding;
mod portfolio;
mod snapshot;
mod symbol;

pub use holding::{value_holding, HoldingValuation, HoldingValue};
pub use portfolio::{aggregate_portfolio, PortfolioAggregate};
pub use snapshot::{compute_snapshot, PortfolioSnapshot};
pub use symbol::{aggregate_symbol, SymbolAggregate, SymbolValue};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Why a valuation could not be produced this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnavailableReason {
    /// The source was healthy but held no quote for the ticker.
    NoPrice,
    /// The source reported a transport or lookup failure.
    FetchFailed,
}

/// Outcome of one valuation: either the computed figures or an explicit
/// unavailable marker with its reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValuationState<T> {
    /// A price was obtained and the figures were computed.
    Priced(T),
    /// No price could be obtained this cycle.
    Unavailable(UnavailableReason),
}

impl<T> ValuationState<T> {
    /// Returns true if a price was obtained.
    pub fn is_priced(&self) -> bool {
        matches!(self, Self::Priced(_))
    }

    /// Returns true if no price could be obtained.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// The computed figures, if priced.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Priced(v) => Some(v),
            Self::Unavailable(_) => None,
        }
    }

    /// The unavailable reason, if unpriced.
    pub fn reason(&self) -> Option<UnavailableReason> {
        match self {
            Self::Priced(_) => None,
            Self::Unavailable(reason) => Some(*reason),
        }
    }
}

/// Rounds a monetary figure to 2 decimal places (banker's rounding).
pub(crate) fn round_money(value: Decimal) -> Decimal {
    value.round_dp(2)
}

/// Gain percentage with the zero-cost-basis guard: a zero purchase value
/// yields 0%, never a division fault. Returned unrounded.
pub(crate) fn gain_percent(gain_loss: Decimal, purchase_value: Decimal) -> Decimal {
    if purchase_value > Decimal::ZERO {
        gain_loss / purchase_value * Decimal::from(100)
    } else {
        Decimal::ZERO
    }
}
