pub mod gateway_kind;
pub mod redirect;
pub mod requests;

pub use gateway_kind::GatewayKind;
pub use redirect::RedirectDirective;
pub use requests::{InitiateRequest, VerifyRequest};
