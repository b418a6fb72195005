use serde::{Deserialize, Serialize};

use crate::core::Amount;
use crate::modules::transactions::models::{InvoiceItem, TransactionId};

/// Purchase request handed to a gateway client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiateRequest {
    /// Merchant transaction id, echoed back on the callback URL
    pub transaction_id: TransactionId,

    pub amount: Amount,

    /// Invoice items (Azki only, ignored by Sadad)
    pub items: Vec<InvoiceItem>,
}

/// Verification request for a previously initiated transaction
///
/// SOAP gateways echo every field so the remote can cross-check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub transaction_id: TransactionId,

    /// Gateway-issued reference returned by the purchase call
    pub reference_id: String,

    pub amount: Amount,
}
