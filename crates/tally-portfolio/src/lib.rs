//! # Tally Portfolio
//!
//! Valuation aggregation for equity portfolios.
//!
//! This crate turns a list of configured stock holdings plus a quote source
//! into three independent views per evaluation cycle:
//!
//! - **Per-holding**: current value, gain/loss, and gain percentage for one
//!   position in one account
//! - **Per-symbol**: the same figures summed across accounts for one
//!   ticker, with an account-level share breakdown
//! - **Whole-portfolio**: totals across every holding, with a ticker-level
//!   value breakdown
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every view is recomputed per cycle from explicit
//!   inputs; the caller owns the latest result
//! - **Explicit unavailability**: a ticker that cannot be priced yields an
//!   [`Unavailable`](valuation::ValuationState::Unavailable) result record
//!   (holding/symbol level) or is excluded from the totals (portfolio
//!   level), never an error or a zero
//! - **Independent views**: no quote is cached or shared across views;
//!   prices moving between fetches make the views disagree transiently
//!
//! ## Quick Start
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use tally_ext_file::StaticQuoteSource;
//! use tally_portfolio::prelude::*;
//!
//! # fn main() -> PortfolioResult<()> {
//! let holdings = vec![
//!     Holding::builder()
//!         .account("Brokerage")
//!         .ticker("AAPL")
//!         .shares(dec!(10))
//!         .purchase_price(dec!(100))
//!         .build()?,
//!     Holding::builder()
//!         .account("IRA")
//!         .ticker("AAPL")
//!         .shares(dec!(5))
//!         .purchase_price(dec!(120))
//!         .build()?,
//! ];
//!
//! let source = StaticQuoteSource::new().with_price("AAPL", dec!(150));
//! let snapshot = compute_snapshot(&holdings, &source);
//!
//! assert_eq!(snapshot.portfolio.total_current_value, dec!(2250.00));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`types`] - Input types ([`Holding`] and its builder)
//! - [`valuation`] - The three valuation operations and their result records
//! - [`error`] - Construction-time validation errors

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;
pub mod valuation;

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};
pub use types::{Holding, HoldingBuilder};
pub use valuation::{
    aggregate_portfolio, aggregate_symbol, compute_snapshot, value_holding, HoldingValuation,
    HoldingValue, PortfolioAggregate, PortfolioSnapshot, SymbolAggregate, SymbolValue,
    UnavailableReason, ValuationState,
};

/// Commonly used imports.
pub mod prelude {
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::types::{Holding, HoldingBuilder};
    pub use crate::valuation::{
        aggregate_portfolio, aggregate_symbol, compute_snapshot, value_holding, HoldingValuation,
        HoldingValue, PortfolioAggregate, PortfolioSnapshot, SymbolAggregate, SymbolValue,
        UnavailableReason, ValuationState,
    };
    pub use tally_quotes::{QuoteError, QuoteSource, Ticker};
}
