//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are entered as decimal strings ("3.99"), validated, and persisted as
//! an integer number of cents so that the storage layer can enforce `>= 0`
//! with a plain check constraint.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is empty.
    #[error("This field is required.")]
    Empty,
    /// The input is not a decimal number.
    #[error("Enter a number.")]
    NotANumber,
    /// The price is below zero.
    #[error("Price cannot be negative.")]
    Negative,
    /// The price has sub-cent precision.
    #[error("Use at most 2 decimal places.")]
    TooPrecise,
    /// The price does not fit in the cents column.
    #[error("Price is too large.")]
    TooLarge,
}

/// A non-negative price with cent precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    amount: Decimal,
}

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self {
        amount: Decimal::ZERO,
    };

    /// Parse a price from user input.
    ///
    /// Accepts an optional leading `$`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a number, negative, has more
    /// than two decimal places, or does not fit in an `i64` number of cents.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount = Decimal::from_str(trimmed).map_err(|_| PriceError::NotANumber)?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }

        let amount = amount.normalize();
        if amount.scale() > 2 {
            return Err(PriceError::TooPrecise);
        }

        let price = Self { amount };
        if price.to_cents().is_none() {
            return Err(PriceError::TooLarge);
        }

        Ok(price)
    }

    /// Create a price from an integer number of cents.
    ///
    /// Negative inputs are clamped to zero.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self {
            amount: Decimal::new(cents.max(0), 2),
        }
    }

    /// The amount in cents, or `None` if it does not fit in an `i64`.
    #[must_use]
    pub fn to_cents(&self) -> Option<i64> {
        self.amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
    }

    /// The amount in the currency's standard unit.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.amount)
    }
}
