use async_trait::async_trait;

use crate::core::Result;
use crate::modules::transactions::models::{
    NewTransaction, Transaction, TransactionId, TransactionLog,
};

/// Persistence collaborator for transaction records and their log
///
/// Implementations only store; lifecycle rules live in the state machine.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Persist a new record in `Created`, allocating its id
    async fn insert(&self, new: NewTransaction) -> Result<Transaction>;

    /// Find a record by id
    async fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>>;

    /// Overwrite an existing record
    async fn update(&self, transaction: &Transaction) -> Result<()>;

    /// Append a log line
    async fn append_log(&self, entry: TransactionLog) -> Result<()>;

    /// Log lines of a transaction in insertion order
    async fn logs_for(&self, id: TransactionId) -> Result<Vec<TransactionLog>>;
}
