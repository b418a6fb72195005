pub mod classifier;
pub mod gateways;
pub mod ports;
pub mod signatures;
pub mod transactions;
