//! Domain types for portfolio valuation.
//!
//! - [`Holding`]: one account's position in one ticker, the unit of input
//! - [`HoldingBuilder`]: validating constructor for [`Holding`]

mod holding;

// Re-export all types
pub use holding::{Holding, HoldingBuilder};
