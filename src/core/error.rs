use std::fmt;

/// Library-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Amount is not a positive integer
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Signature key or cipher failure
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Transport-level failure reaching the gateway
    #[error("Gateway {gateway} unreachable: {message}")]
    GatewayUnreachable { gateway: String, message: String },

    /// Gateway answered with something we cannot decode
    #[error("Gateway {gateway} protocol error: {message}")]
    GatewayProtocol { gateway: String, message: String },

    /// Gateway explicitly denied the request
    #[error("Gateway rejected request ({code}): {message}")]
    GatewayRejected {
        code: String,
        message: String,
        retryable: bool,
    },

    /// Transition or call made in the wrong lifecycle state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation errors for business rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transaction store failures
    #[error("Store error: {0}")]
    Store(String),

    /// Callback data disagrees with the stored transaction
    #[error("Callback mismatch ({code}): {message}")]
    CallbackMismatch { code: String, message: String },

    /// Façade-level wrapper for `ready()`
    #[error("Payment initiation failed: {0}")]
    PaymentInitiation(#[source] Box<AppError>),

    /// Façade-level wrapper for `verify()`
    #[error("Payment verification failed: {0}")]
    PaymentVerification(#[source] Box<AppError>),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        AppError::InvalidAmount(msg.into())
    }

    pub fn crypto(msg: impl Into<String>) -> Self {
        AppError::Crypto(msg.into())
    }

    pub fn unreachable(gateway: impl fmt::Display, msg: impl Into<String>) -> Self {
        AppError::GatewayUnreachable {
            gateway: gateway.to_string(),
            message: msg.into(),
        }
    }

    pub fn protocol(gateway: impl fmt::Display, msg: impl Into<String>) -> Self {
        AppError::GatewayProtocol {
            gateway: gateway.to_string(),
            message: msg.into(),
        }
    }

    pub fn rejected(code: impl Into<String>, msg: impl Into<String>, retryable: bool) -> Self {
        AppError::GatewayRejected {
            code: code.into(),
            message: msg.into(),
            retryable,
        }
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        AppError::InvalidState(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        AppError::Store(msg.into())
    }

    pub fn callback_mismatch(code: impl Into<String>, msg: impl Into<String>) -> Self {
        AppError::CallbackMismatch {
            code: code.into(),
            message: msg.into(),
        }
    }

    /// Wrap an error at the `ready()` boundary. Already-wrapped errors pass through.
    pub fn initiation(err: AppError) -> Self {
        match err {
            AppError::PaymentInitiation(_) => err,
            other => AppError::PaymentInitiation(Box::new(other)),
        }
    }

    /// Wrap an error at the `verify()` boundary. Already-wrapped errors pass through.
    pub fn verification(err: AppError) -> Self {
        match err {
            AppError::PaymentVerification(_) => err,
            other => AppError::PaymentVerification(Box::new(other)),
        }
    }

    /// Innermost error below any façade wrappers
    pub fn root(&self) -> &AppError {
        match self {
            AppError::PaymentInitiation(inner) | AppError::PaymentVerification(inner) => {
                inner.root()
            }
            other => other,
        }
    }

    /// Whether the caller's retry policy may try again
    pub fn is_retryable(&self) -> bool {
        match self.root() {
            AppError::GatewayUnreachable { .. } => true,
            AppError::GatewayRejected { retryable, .. } => *retryable,
            _ => false,
        }
    }

    /// Normalized code written to the transaction log
    pub fn log_code(&self) -> String {
        match self.root() {
            AppError::InvalidAmount(_) => "invalid-amount".to_string(),
            AppError::Crypto(_) => "crypto-error".to_string(),
            AppError::GatewayUnreachable { .. } => "connection-error".to_string(),
            AppError::GatewayProtocol { .. } => "invalid-response".to_string(),
            AppError::GatewayRejected { code, .. } => code.clone(),
            AppError::CallbackMismatch { code, .. } => code.clone(),
            AppError::Store(_) => "store-error".to_string(),
            AppError::InvalidState(_) => "invalid-state".to_string(),
            AppError::NotFound(_) => "not-found".to_string(),
            _ => "error".to_string(),
        }
    }

    /// Message written to the transaction log
    pub fn log_message(&self) -> String {
        match self.root() {
            AppError::GatewayRejected { message, .. }
            | AppError::CallbackMismatch { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
