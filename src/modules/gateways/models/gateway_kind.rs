use serde::{Deserialize, Serialize};

/// Supported payment gateways
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    /// Azki installment gateway (JSON over HTTP, AES-signed requests)
    Azki,

    /// Sadad / Bank Melli gateway (SOAP over HTTP, form-post redirect)
    Sadad,
}

impl GatewayKind {
    pub fn name(&self) -> &'static str {
        match self {
            GatewayKind::Azki => "azki",
            GatewayKind::Sadad => "sadad",
        }
    }
}

impl std::fmt::Display for GatewayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for GatewayKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "azki" => Ok(GatewayKind::Azki),
            "sadad" => Ok(GatewayKind::Sadad),
            _ => Err(format!("Unknown gateway: {}", s)),
        }
    }
}
