use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::TransactionStore;
use crate::core::{AppError, Result};
use crate::modules::transactions::models::{
    NewTransaction, Transaction, TransactionId, TransactionLog,
};

/// Thread-safe in-memory transaction store
///
/// Clones share the same underlying maps.
#[derive(Clone)]
pub struct InMemoryTransactionStore {
    transactions: Arc<RwLock<HashMap<TransactionId, Transaction>>>,
    logs: Arc<RwLock<Vec<TransactionLog>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Allocate ids from `first_id` upwards
    pub fn starting_at(first_id: u64) -> Self {
        Self {
            transactions: Arc::new(RwLock::new(HashMap::new())),
            logs: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(first_id)),
        }
    }

    pub async fn len(&self) -> usize {
        self.transactions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.transactions.read().await.is_empty()
    }
}

impl Default for InMemoryTransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert(&self, new: NewTransaction) -> Result<Transaction> {
        let id = TransactionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let transaction = Transaction::create(id, new);

        let mut transactions = self.transactions.write().await;
        transactions.insert(id, transaction.clone());
        Ok(transaction)
    }

    async fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(&id).cloned())
    }

    async fn update(&self, transaction: &Transaction) -> Result<()> {
        let mut transactions = self.transactions.write().await;
        match transactions.get_mut(&transaction.id) {
            Some(slot) => {
                *slot = transaction.clone();
                Ok(())
            }
            None => Err(AppError::store(format!(
                "transaction {} does not exist",
                transaction.id
            ))),
        }
    }

    async fn append_log(&self, entry: TransactionLog) -> Result<()> {
        self.logs.write().await.push(entry);
        Ok(())
    }

    async fn logs_for(&self, id: TransactionId) -> Result<Vec<TransactionLog>> {
        let logs = self.logs.read().await;
        Ok(logs
            .iter()
            .filter(|entry| entry.transaction_id == id)
            .cloned()
            .collect())
    }
}
