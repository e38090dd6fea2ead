//! Quote source trait.
//!
//! [`QuoteSource`] is the single seam between valuation and the outside
//! world. Implementations may wrap a market data API, a file, or a fixed
//! table; the valuation side never caches or batches, so every call is a
//! fresh snapshot request.

use rust_decimal::Decimal;

use crate::error::QuoteError;
use crate::ticker::Ticker;

/// Trait for current-price providers (snapshot only).
///
/// The trait is synchronous and object-safe: valuation runs single-threaded
/// and takes the source as `&dyn QuoteSource`.
pub trait QuoteSource {
    /// Short source name used in diagnostics.
    fn name(&self) -> &str;

    /// Get the current price for a ticker.
    ///
    /// Returns `Ok(None)` when the source is healthy but carries no quote
    /// for the ticker. Transport and lookup failures surface as
    /// `Err(QuoteError)`.
    fn get_price(&self, ticker: &Ticker) -> Result<Option<Decimal>, QuoteError>;
}
