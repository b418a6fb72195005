pub mod invoice_item;
pub mod transaction;
pub mod transaction_log;

pub use invoice_item::InvoiceItem;
pub use transaction::{
    NewTransaction, StatusTransition, Transaction, TransactionId, TransactionStatus,
};
pub use transaction_log::TransactionLog;
