//! # Tally Quotes
//!
//! Quote source trait definitions for the Tally valuation library.
//!
//! This crate contains ONLY trait and identifier definitions with zero
//! runtime dependencies. All implementations live in extension crates
//! (for example `tally-ext-file` for in-memory and CSV-backed sources).
//!
//! ## Module Structure
//!
//! - [`ticker`]: The [`Ticker`] identifier used to key quotes and holdings
//! - [`source`]: The [`QuoteSource`] trait that price providers implement
//! - [`error`]: The [`QuoteError`] taxonomy a source may report
//!
//! ## Failure Model
//!
//! A source distinguishes "no quote available" (`Ok(None)`) from a failed
//! fetch (`Err(QuoteError)`). Consumers treat both as "unpriced this cycle";
//! the taxonomy exists so source implementors can log and diagnose their own
//! transports.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod source;
pub mod ticker;

// Re-export commonly used types
pub use error::QuoteError;
pub use source::QuoteSource;
pub use ticker::Ticker;
