pub mod models;
pub mod repositories;
pub mod services;

pub use models::{InvoiceItem, Transaction, TransactionId, TransactionLog, TransactionStatus};
pub use repositories::{InMemoryTransactionStore, TransactionStore};
pub use services::TransactionStateMachine;
