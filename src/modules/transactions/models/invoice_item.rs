// Invoice item attached to a transaction before the purchase request.
//
// Items are serialized as-is into the Azki purchase body, so field names
// follow the gateway wire format.

use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// A single purchased product or service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Product or service name
    pub name: String,

    /// Quantity
    pub count: u32,

    /// Unit amount in the smallest currency unit
    pub amount: u64,

    /// Product page
    pub url: String,
}

impl InvoiceItem {
    /// Create a new invoice item with validation
    ///
    /// # Arguments
    /// * `name` - Must not be blank
    /// * `count` - Must be positive
    /// * `amount` - Must be positive
    /// * `url` - Reference URL for the item
    pub fn new(
        name: impl Into<String>,
        count: u32,
        amount: u64,
        url: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        Self::validate_name(&name)?;

        if count == 0 {
            return Err(AppError::validation("Item count must be positive"));
        }

        if amount == 0 {
            return Err(AppError::validation("Item amount must be positive"));
        }

        Ok(Self {
            name,
            count,
            amount,
            url: url.into(),
        })
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Item name cannot be empty"));
        }
        if name.len() > 255 {
            return Err(AppError::validation(
                "Item name cannot exceed 255 characters",
            ));
        }
        Ok(())
    }

    /// count × amount, `None` on overflow
    pub fn total(&self) -> Option<u64> {
        self.amount.checked_mul(u64::from(self.count))
    }
}
