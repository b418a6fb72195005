//! Payport Payment Gateway Library
//!
//! Drives a payment from purchase to settlement against Iranian payment
//! gateways (Azki, Sadad) behind one `set` / `ready` / `redirect` / `verify`
//! surface, keeping every transaction on a forward-only lifecycle.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use config::Config;
pub use core::{AppError, Amount, Result};
pub use modules::classifier;
pub use modules::gateways;
pub use modules::ports::{PaymentPort, VerifyTarget};
pub use modules::signatures;
pub use modules::transactions;
