use crate::core::Result;
use crate::modules::classifier::GatewayResponse;
use crate::modules::gateways::models::{GatewayKind, InitiateRequest, VerifyRequest};
use async_trait::async_trait;

/// One payment gateway's wire protocol
///
/// Clients are stateless per call and make exactly one outbound request per
/// method, with no retries.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Which gateway this client speaks to
    fn kind(&self) -> GatewayKind;

    /// Get gateway name
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Send the purchase request
    ///
    /// A successful response always carries `reference_id` and
    /// `redirect_target`. Explicit denials are `GatewayRejected`.
    async fn initiate(&self, request: &InitiateRequest) -> Result<GatewayResponse>;

    /// Query the payment status before verification, if the gateway has such a call
    ///
    /// The answer is recorded for diagnostics and does not settle the
    /// transaction. Only transport and protocol errors abort verification.
    async fn query_status(&self, request: &VerifyRequest) -> Result<Option<GatewayResponse>> {
        let _ = request;
        Ok(None)
    }

    /// Confirm the payment with the gateway
    ///
    /// Returns the classified outcome; a non-success category is not an `Err`.
    async fn verify(&self, request: &VerifyRequest) -> Result<GatewayResponse>;
}
