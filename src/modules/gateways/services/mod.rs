pub mod azki;
pub mod gateway_service;
pub mod gateway_trait;
pub mod http;
pub mod sadad;
pub mod soap;

pub use azki::AzkiClient;
pub use gateway_service::{GatewayInfo, GatewayService};
pub use gateway_trait::PaymentGateway;
pub use http::{build_client, callback_url};
pub use sadad::SadadClient;
