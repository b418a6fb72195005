use serde::Deserialize;
use url::Url;

use super::required;
use crate::core::{AppError, Result};

pub const AZKI_DEFAULT_BASE_URL: &str = "https://api.azkiloan.com";
pub const SADAD_DEFAULT_SERVICE_URL: &str = "https://sadad.shaparak.ir/services/MerchantUtility.asmx";

/// Azki (JSON over HTTP) credentials and endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AzkiConfig {
    pub merchant_id: String,
    /// Hex-encoded AES-256 key used for request signatures
    pub api_key: String,
    pub callback_url: String,
    pub fallback_url: String,
    pub base_url: String,
    pub user_mobile: String,
}

impl AzkiConfig {
    pub fn new(merchant_id: &str, api_key: &str, callback_url: &str) -> Self {
        Self {
            merchant_id: merchant_id.to_string(),
            api_key: api_key.to_string(),
            callback_url: callback_url.to_string(),
            fallback_url: callback_url.to_string(),
            base_url: AZKI_DEFAULT_BASE_URL.to_string(),
            user_mobile: String::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn from_lookup<F>(lookup: &F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup("AZKI_MERCHANT_ID").is_none() {
            return Ok(None);
        }

        let callback_url = required(lookup, "AZKI_CALLBACK_URL")?;
        Ok(Some(Self {
            merchant_id: required(lookup, "AZKI_MERCHANT_ID")?,
            api_key: required(lookup, "AZKI_API_KEY")?,
            fallback_url: lookup("AZKI_FALLBACK_URL").unwrap_or_else(|| callback_url.clone()),
            callback_url,
            base_url: lookup("AZKI_BASE_URL").unwrap_or_else(|| AZKI_DEFAULT_BASE_URL.to_string()),
            user_mobile: lookup("AZKI_USER_MOBILE").unwrap_or_default(),
        }))
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.len() != 64 || hex::decode(&self.api_key).is_err() {
            return Err(AppError::configuration(
                "AZKI_API_KEY must be 64 hex characters",
            ));
        }
        validate_url("AZKI_CALLBACK_URL", &self.callback_url)?;
        validate_url("AZKI_FALLBACK_URL", &self.fallback_url)?;
        validate_url("AZKI_BASE_URL", &self.base_url)
    }
}

/// Sadad (SOAP over HTTP) credentials and endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SadadConfig {
    pub merchant: String,
    pub terminal_id: String,
    pub transaction_key: String,
    pub callback_url: String,
    pub service_url: String,
}

impl SadadConfig {
    pub fn new(merchant: &str, terminal_id: &str, transaction_key: &str, callback_url: &str) -> Self {
        Self {
            merchant: merchant.to_string(),
            terminal_id: terminal_id.to_string(),
            transaction_key: transaction_key.to_string(),
            callback_url: callback_url.to_string(),
            service_url: SADAD_DEFAULT_SERVICE_URL.to_string(),
        }
    }

    pub fn with_service_url(mut self, service_url: impl Into<String>) -> Self {
        self.service_url = service_url.into();
        self
    }

    pub(crate) fn from_lookup<F>(lookup: &F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup("SADAD_MERCHANT").is_none() {
            return Ok(None);
        }

        Ok(Some(Self {
            merchant: required(lookup, "SADAD_MERCHANT")?,
            terminal_id: required(lookup, "SADAD_TERMINAL_ID")?,
            transaction_key: required(lookup, "SADAD_TRANSACTION_KEY")?,
            callback_url: required(lookup, "SADAD_CALLBACK_URL")?,
            service_url: lookup("SADAD_SERVICE_URL")
                .unwrap_or_else(|| SADAD_DEFAULT_SERVICE_URL.to_string()),
        }))
    }

    pub fn validate(&self) -> Result<()> {
        validate_url("SADAD_CALLBACK_URL", &self.callback_url)?;
        validate_url("SADAD_SERVICE_URL", &self.service_url)
    }
}

fn validate_url(name: &str, value: &str) -> Result<()> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| AppError::configuration(format!("{} is not a valid URL: {}", name, e)))
}
