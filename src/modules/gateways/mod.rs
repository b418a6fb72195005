pub mod models;
pub mod services;

pub use models::{GatewayKind, InitiateRequest, RedirectDirective, VerifyRequest};
pub use services::{
    build_client, callback_url, AzkiClient, GatewayInfo, GatewayService, PaymentGateway,
    SadadClient,
};
