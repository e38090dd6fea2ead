//! Identifier types used across the valuation library.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stock ticker symbol (exchange symbol or internal ID).
///
/// Stored exactly as given; no case normalization is applied. Two holdings
/// aggregate together only when their tickers match exactly.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Ticker(pub String);

impl Ticker {
    /// Create a new ticker.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// Get the ticker as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
