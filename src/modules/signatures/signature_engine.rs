//! Request signatures for gateways that authenticate with a symmetric key.
//!
//! The token is `hex(AES-256-CBC(key, iv = 0, "{subpath}#{timestamp}#{method}#{key_hex}"))`
//! with PKCS#7 padding. The all-zero IV is a wire-compatibility constraint
//! of the Azki API and must not be changed unilaterally.

use std::sync::Arc;

use aes::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};

use crate::core::{AppError, Clock, Result};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

const ZERO_IV: [u8; 16] = [0u8; 16];

/// Inputs of a single signature; consumed by [`SignatureEngine::sign`]
#[derive(Debug, Clone, Copy)]
pub struct SignatureContext<'a> {
    /// Endpoint path, e.g. `/payment/purchase`
    pub subpath: &'a str,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
    /// HTTP method token, e.g. `POST`
    pub http_method: &'a str,
    /// Hex-encoded 256-bit key
    pub secret_key: &'a str,
}

/// Stateless signature computation
#[derive(Debug, Default, Clone, Copy)]
pub struct SignatureEngine;

impl SignatureEngine {
    /// Compute the hex signature token
    ///
    /// # Errors
    /// * `Crypto` - If the secret key is not hex or not 32 bytes
    pub fn sign(&self, context: SignatureContext<'_>) -> Result<String> {
        let key = hex::decode(context.secret_key)
            .map_err(|e| AppError::crypto(format!("secret key is not valid hex: {}", e)))?;

        let cipher = Aes256CbcEnc::new_from_slices(&key, &ZERO_IV).map_err(|_| {
            AppError::crypto(format!(
                "secret key must be 32 bytes for AES-256, got {}",
                key.len()
            ))
        })?;

        let plaintext = format!(
            "{}#{}#{}#{}",
            context.subpath, context.timestamp, context.http_method, context.secret_key
        );

        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
        Ok(hex::encode(ciphertext))
    }
}

/// Signs requests for one merchant key at the clock's current time
#[derive(Clone)]
pub struct RequestSigner {
    engine: SignatureEngine,
    secret_key: String,
    clock: Arc<dyn Clock>,
}

impl RequestSigner {
    pub fn new(secret_key: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            engine: SignatureEngine,
            secret_key: secret_key.into(),
            clock,
        }
    }

    /// Signature for `method subpath` at the current timestamp
    pub fn sign(&self, subpath: &str, http_method: &str) -> Result<String> {
        self.engine.sign(SignatureContext {
            subpath,
            timestamp: self.clock.unix_timestamp(),
            http_method,
            secret_key: &self.secret_key,
        })
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
