use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use super::azki::AzkiClient;
use super::gateway_trait::PaymentGateway;
use super::http::build_client;
use super::sadad::SadadClient;
use crate::config::Config;
use crate::core::{AppError, Result};
use crate::modules::gateways::models::GatewayKind;
use crate::modules::ports::PaymentPort;
use crate::modules::transactions::repositories::TransactionStore;

/// Registry of configured gateway clients
pub struct GatewayService {
    gateways: HashMap<GatewayKind, Arc<dyn PaymentGateway>>,
}

impl GatewayService {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            gateways: HashMap::new(),
        }
    }

    /// Build clients for every gateway present in `config`
    ///
    /// All clients share one HTTP client carrying the configured timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let client = build_client(config.app.http_timeout())?;
        let mut service = Self::new();

        if let Some(azki) = &config.azki {
            service.register_gateway(Arc::new(AzkiClient::new(azki.clone(), client.clone())));
        }

        if let Some(sadad) = &config.sadad {
            service.register_gateway(Arc::new(SadadClient::new(sadad.clone(), client.clone())));
        }

        info!(gateways = service.gateways.len(), "Gateway registry initialized");
        Ok(service)
    }

    /// Register a gateway, replacing any previous client of the same kind
    pub fn register_gateway(&mut self, gateway: Arc<dyn PaymentGateway>) {
        self.gateways.insert(gateway.kind(), gateway);
    }

    /// Get a gateway by kind
    pub fn get_gateway(&self, kind: GatewayKind) -> Result<Arc<dyn PaymentGateway>> {
        self.gateways
            .get(&kind)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Gateway '{}' not configured", kind)))
    }

    /// Fresh payment port for one checkout flow
    pub fn port(&self, kind: GatewayKind, store: Arc<dyn TransactionStore>) -> Result<PaymentPort> {
        Ok(PaymentPort::new(self.get_gateway(kind)?, store))
    }

    /// List all available gateways
    pub fn list_gateways(&self) -> Vec<GatewayInfo> {
        let mut gateways: Vec<GatewayInfo> = self
            .gateways
            .values()
            .map(|gateway| GatewayInfo {
                kind: gateway.kind(),
                name: gateway.name().to_string(),
            })
            .collect();
        gateways.sort_by(|a, b| a.name.cmp(&b.name));
        gateways
    }
}

impl Default for GatewayService {
    fn default() -> Self {
        Self::new()
    }
}

/// Gateway information for listing
#[derive(Debug, Clone, serde::Serialize)]
pub struct GatewayInfo {
    pub kind: GatewayKind,
    pub name: String,
}
