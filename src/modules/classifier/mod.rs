pub mod code_tables;
pub mod models;
pub mod response_classifier;

pub use models::{CodeEntry, CodeTable, GatewayResponse, OutcomeCategory};
pub use response_classifier::ResponseClassifier;
