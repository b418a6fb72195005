pub mod models;
pub mod payment_port;

pub use models::VerifyTarget;
pub use payment_port::PaymentPort;
