use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

pub mod gateway;
pub mod logging;

pub use gateway::{AzkiConfig, SadadConfig};
pub use logging::{init_tracing, LogFormat};

/// Main library configuration, injected into gateway clients at construction
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub azki: Option<AzkiConfig>,
    pub sadad: Option<SadadConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: "development".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Plain,
            http_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app = AppConfig {
            env: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format: lookup("LOG_FORMAT")
                .map(|value| value.parse::<LogFormat>())
                .transpose()?
                .unwrap_or_default(),
            http_timeout_secs: lookup("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .map_err(|_| AppError::configuration("Invalid HTTP_TIMEOUT_SECS"))?,
        };

        Ok(Config {
            app,
            azki: AzkiConfig::from_lookup(&lookup)?,
            sadad: SadadConfig::from_lookup(&lookup)?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.app.http_timeout_secs == 0 {
            return Err(AppError::configuration(
                "HTTP timeout must be greater than 0",
            ));
        }

        if let Some(azki) = &self.azki {
            azki.validate()?;
        }

        if let Some(sadad) = &self.sadad {
            sadad.validate()?;
        }

        Ok(())
    }
}

/// Fetch a variable that must be present once its gateway section is enabled
pub(crate) fn required<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::configuration(format!("{} not set", name)))
}
