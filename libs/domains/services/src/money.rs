//! Money value object: an hourly rate with its currency.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ServiceError, ServiceResult};

/// Default currency applied when a request omits one.
pub const DEFAULT_CURRENCY: &str = "USD";

const MINOR_UNITS_PER_UNIT: f64 = 100.0;

/// Non-negative monetary amount with a 3-letter currency code.
///
/// Stored as minor units (cents) for exact equality and hashing; the
/// decimal value is exposed through [`Money::amount`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Money {
    amount_minor: i64,
    currency: String,
}

impl Money {
    /// Validates and builds a money value.
    ///
    /// Fails on negative amounts and on currencies that are not exactly
    /// three ASCII letters. The currency is normalized upper-case.
    pub fn new(amount: f64, currency: &str) -> ServiceResult<Self> {
        if amount < 0.0 {
            return Err(ServiceError::NegativeAmount);
        }

        let currency = currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ServiceError::InvalidCurrency(currency.to_string()));
        }

        Ok(Self {
            amount_minor: (amount * MINOR_UNITS_PER_UNIT).round() as i64,
            currency: currency.to_uppercase(),
        })
    }

    /// US dollars, the default currency.
    pub fn usd(amount: f64) -> ServiceResult<Self> {
        Self::new(amount, DEFAULT_CURRENCY)
    }

    /// Rehydrates a stored value (validated at write time).
    pub fn from_minor(amount_minor: i64, currency: String) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Decimal amount (e.g. 150.5)
    pub fn amount(&self) -> f64 {
        self.amount_minor as f64 / MINOR_UNITS_PER_UNIT
    }

    /// Amount in minor units (cents)
    pub fn amount_minor(&self) -> i64 {
        self.amount_minor
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    fn check_currency(&self, other: &Money) -> ServiceResult<()> {
        if self.currency != other.currency {
            return Err(ServiceError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }
        Ok(())
    }

    /// Adds two amounts of the same currency.
    pub fn add(&self, other: &Money) -> ServiceResult<Money> {
        self.check_currency(other)?;
        Ok(Self {
            amount_minor: self.amount_minor + other.amount_minor,
            currency: self.currency.clone(),
        })
    }

    /// Subtracts an amount of the same currency; a negative result fails.
    pub fn subtract(&self, other: &Money) -> ServiceResult<Money> {
        self.check_currency(other)?;
        Self::new(
            (self.amount_minor - other.amount_minor) as f64 / MINOR_UNITS_PER_UNIT,
            &self.currency,
        )
    }

    /// Scales the amount; routed through the constructor so a negative
    /// factor fails the negativity check.
    pub fn multiply(&self, factor: f64) -> ServiceResult<Money> {
        Self::new(self.amount() * factor, &self.currency)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2} {}", self.amount(), self.currency)
    }
}
