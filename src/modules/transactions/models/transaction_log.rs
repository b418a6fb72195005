use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TransactionId;

/// Append-only log line attached to a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLog {
    pub transaction_id: TransactionId,

    /// Gateway result code or a normalized error code
    pub code: String,

    pub message: String,

    pub logged_at: DateTime<Utc>,
}
