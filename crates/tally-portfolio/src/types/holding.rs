//! Holding representation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_quotes::Ticker;

/// A single holding: one account's position in one ticker.
///
/// Holdings are immutable inputs. The same (account, ticker) pair may appear
/// more than once; aggregation simply sums the rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Account the position is held in (e.g. "Brokerage", "IRA").
    pub account: String,

    /// Ticker symbol of the position.
    pub ticker: Ticker,

    /// Number of shares held. Fractional shares are allowed.
    pub shares: Decimal,

    /// Purchase price per share in the portfolio currency.
    pub purchase_price: Decimal,
}

impl Holding {
    /// Creates a new holding builder.
    #[must_use]
    pub fn builder() -> HoldingBuilder {
        HoldingBuilder::new()
    }

    /// Returns the total purchase value (shares x purchase price), unrounded.
    #[must_use]
    pub fn purchase_value(&self) -> Decimal {
        self.shares * self.purchase_price
    }

    /// Returns the display label, "{account} - {ticker}".
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.account, self.ticker)
    }

    /// Returns a lowercase identifier, "{account}_{ticker}", suitable for
    /// keying the holding in host-side registries.
    #[must_use]
    pub fn slug(&self) -> String {
        format!("{}_{}", self.account, self.ticker).to_lowercase()
    }
}

/// Builder for constructing a Holding.
#[derive(Debug, Clone, Default)]
pub struct HoldingBuilder {
    account: Option<String>,
    ticker: Option<Ticker>,
    shares: Option<Decimal>,
    purchase_price: Option<Decimal>,
}

impl HoldingBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the account name.
    #[must_use]
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Sets the ticker.
    #[must_use]
    pub fn ticker(mut self, ticker: impl Into<Ticker>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    /// Sets the share count.
    #[must_use]
    pub fn shares(mut self, shares: Decimal) -> Self {
        self.shares = Some(shares);
        self
    }

    /// Sets the purchase price per share.
    #[must_use]
    pub fn purchase_price(mut self, price: Decimal) -> Self {
        self.purchase_price = Some(price);
        self
    }

    /// Builds the holding.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing, or if shares or
    /// purchase price are negative. Zero is allowed for both: a zero-cost
    /// position simply reports a gain percentage of zero.
    pub fn build(self) -> crate::PortfolioResult<Holding> {
        let account = self
            .account
            .ok_or_else(|| crate::PortfolioError::missing_field("account"))?;

        let ticker = self
            .ticker
            .ok_or_else(|| crate::PortfolioError::missing_field("ticker"))?;

        let shares = self
            .shares
            .ok_or_else(|| crate::PortfolioError::missing_field("shares"))?;

        let purchase_price = self
            .purchase_price
            .ok_or_else(|| crate::PortfolioError::missing_field("purchase_price"))?;

        let label = format!("{} - {}", account, ticker);

        if shares < Decimal::ZERO {
            return Err(crate::PortfolioError::invalid_holding(
                &label,
                "shares cannot be negative",
            ));
        }

        if purchase_price < Decimal::ZERO {
            return Err(crate::PortfolioError::invalid_holding(
                &label,
                "purchase_price cannot be negative",
            ));
        }

        Ok(Holding {
            account,
            ticker,
            shares,
            purchase_price,
        })
    }
}
