//! # Tally Ext File
//!
//! File-based and in-memory quote sources for the Tally valuation library.
//!
//! This crate provides default [`QuoteSource`] implementations for testing
//! and end-of-day loads:
//! - [`StaticQuoteSource`]: fixed in-memory price table with failure injection
//! - [`CsvQuoteSource`]: `ticker,price` CSV file, reloadable
//! - [`EmptyQuoteSource`]: never has a quote
//!
//! For production real-time market data, use a provider extension crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;

use tally_quotes::{QuoteError, QuoteSource, Ticker};

// =============================================================================
// STATIC QUOTE SOURCE
// =============================================================================

/// In-memory quote source backed by a fixed price table.
///
/// Tickers can also be marked as failing, in which case `get_price` returns
/// `Err(QuoteError::ConnectionFailed)` for them. Unknown tickers return
/// `Ok(None)`.
#[derive(Debug, Clone)]
pub struct StaticQuoteSource {
    prices: HashMap<Ticker, Decimal>,
    failures: HashSet<Ticker>,
}

impl StaticQuoteSource {
    /// Create an empty static source.
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
            failures: HashSet::new(),
        }
    }

    /// Adds a price for a ticker.
    #[must_use]
    pub fn with_price(mut self, ticker: impl Into<Ticker>, price: Decimal) -> Self {
        self.prices.insert(ticker.into(), price);
        self
    }

    /// Marks a ticker as failing every fetch.
    #[must_use]
    pub fn with_failure(mut self, ticker: impl Into<Ticker>) -> Self {
        self.failures.insert(ticker.into());
        self
    }

    /// Sets or replaces the price for a ticker.
    pub fn set_price(&mut self, ticker: impl Into<Ticker>, price: Decimal) {
        self.prices.insert(ticker.into(), price);
    }

    /// Number of tickers with a price.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if no ticker has a price.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl Default for StaticQuoteSource {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteSource for StaticQuoteSource {
    fn name(&self) -> &str {
        "static"
    }

    fn get_price(&self, ticker: &Ticker) -> Result<Option<Decimal>, QuoteError> {
        if self.failures.contains(ticker) {
            return Err(QuoteError::ConnectionFailed(format!(
                "injected failure for {}",
                ticker
            )));
        }
        Ok(self.prices.get(ticker).copied())
    }
}

// =============================================================================
// CSV QUOTE SOURCE
// =============================================================================

/// CSV record for prices.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    ticker: String,
    price: Decimal,
}

/// CSV-based quote source for testing/EOD.
///
/// Expects a header row followed by `ticker,price` records. A missing file
/// is treated as an empty source so a data directory can be provisioned
/// lazily.
#[derive(Debug)]
pub struct CsvQuoteSource {
    file_path: PathBuf,
    prices: HashMap<Ticker, Decimal>,
}

impl CsvQuoteSource {
    /// Create a new CSV quote source, loading the file immediately.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, QuoteError> {
        let mut source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            prices: HashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload prices from the file, replacing the current table.
    pub fn reload(&mut self) -> Result<(), QuoteError> {
        if !self.file_path.exists() {
            self.prices.clear();
            return Ok(()); // Empty source
        }

        let mut reader = csv::Reader::from_path(&self.file_path)
            .map_err(|e| QuoteError::IoError(e.to_string()))?;

        let mut prices = HashMap::new();
        for result in reader.deserialize() {
            let record: PriceRecord = result.map_err(|e| QuoteError::ParseError(e.to_string()))?;
            prices.insert(Ticker::new(record.ticker), record.price);
        }

        self.prices = prices;
        Ok(())
    }

    /// Number of tickers loaded from the file.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if the file held no records (or did not exist).
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl QuoteSource for CsvQuoteSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn get_price(&self, ticker: &Ticker) -> Result<Option<Decimal>, QuoteError> {
        Ok(self.prices.get(ticker).copied())
    }
}

// =============================================================================
// EMPTY QUOTE SOURCE
// =============================================================================

/// Empty quote source for testing. Every ticker is unpriced.
#[derive(Debug, Clone, Copy)]
pub struct EmptyQuoteSource;

impl QuoteSource for EmptyQuoteSource {
    fn name(&self) -> &str {
        "empty"
    }

    fn get_price(&self, _ticker: &Ticker) -> Result<Option<Decimal>, QuoteError> {
        Ok(None)
    }
}
