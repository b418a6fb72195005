use serde::{Deserialize, Serialize};

use crate::core::{AppError, Amount, Result};
use crate::modules::transactions::models::{Transaction, TransactionId};

/// What the merchant callback knows about the transaction being verified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyTarget {
    pub id: TransactionId,
    pub reference_id: String,
    pub amount: Amount,
}

impl VerifyTarget {
    pub fn new(id: TransactionId, reference_id: impl Into<String>, amount: Amount) -> Self {
        Self {
            id,
            reference_id: reference_id.into(),
            amount,
        }
    }

    /// Target for a stored record
    ///
    /// # Errors
    /// * `InvalidState` - If the gateway never issued a reference
    pub fn from_transaction(transaction: &Transaction) -> Result<Self> {
        let reference_id = transaction.reference_id.clone().ok_or_else(|| {
            AppError::invalid_state(format!(
                "transaction {} has no gateway reference",
                transaction.id
            ))
        })?;
        Ok(Self::new(transaction.id, reference_id, transaction.amount))
    }
}
