use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{AppError, Result};

/// Payment amount in the smallest currency unit (Rial)
///
/// Always strictly positive. Gateways receive the raw integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct Amount(u64);

impl Amount {
    /// Validate a merchant-supplied amount
    pub fn new(value: i64) -> Result<Self> {
        if value <= 0 {
            return Err(AppError::invalid_amount(format!(
                "amount must be a positive integer, got {}",
                value
            )));
        }
        Ok(Self(value as u64))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for Amount {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self> {
        Amount::new(value)
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
