pub mod in_memory_repository;
pub mod transaction_store;

pub use in_memory_repository::InMemoryTransactionStore;
pub use transaction_store::TransactionStore;
