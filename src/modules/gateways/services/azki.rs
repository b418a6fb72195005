use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::gateway_trait::PaymentGateway;
use super::http::{callback_url, read_body, transport_error, undecodable};
use crate::config::AzkiConfig;
use crate::core::{AppError, Clock, Result, SystemClock};
use crate::modules::classifier::{CodeTable, GatewayResponse, ResponseClassifier};
use crate::modules::gateways::models::{
    GatewayKind, InitiateRequest, RedirectDirective, VerifyRequest,
};
use crate::modules::signatures::RequestSigner;
use crate::modules::transactions::models::InvoiceItem;

const PURCHASE_PATH: &str = "/payment/purchase";
const STATUS_PATH: &str = "/payment/status";
const VERIFY_PATH: &str = "/payment/verify";

/// Range of the random `provider_id` sent with each purchase
const PROVIDER_ID_RANGE: std::ops::RangeInclusive<u64> = 1_000_000_000..=999_999_999_999;

/// Azki installment gateway client
///
/// JSON over HTTP. Every request carries a `Signature` header computed over
/// the endpoint subpath and a `MerchantId` header.
pub struct AzkiClient {
    client: Client,
    config: AzkiConfig,
    signer: RequestSigner,
    classifier: ResponseClassifier,
}

impl AzkiClient {
    /// Create a new Azki client
    ///
    /// # Arguments
    /// * `config` - Merchant credentials and endpoints
    /// * `client` - Shared HTTP client (carries the request timeout)
    pub fn new(config: AzkiConfig, client: Client) -> Self {
        Self::with_clock(config, client, Arc::new(SystemClock))
    }

    /// Same as [`AzkiClient::new`] with a custom signature clock
    pub fn with_clock(config: AzkiConfig, client: Client, clock: Arc<dyn Clock>) -> Self {
        let signer = RequestSigner::new(config.api_key.clone(), clock);
        Self {
            client,
            config,
            signer,
            classifier: ResponseClassifier,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Signed POST returning the decoded envelope
    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<AzkiEnvelope> {
        let signature = self.signer.sign(path, "POST")?;

        tracing::debug!(gateway = "azki", path = path, "Sending gateway request");

        let response = self
            .client
            .post(self.endpoint(path))
            .header("Signature", signature)
            .header("MerchantId", &self.config.merchant_id)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(GatewayKind::Azki, e))?;

        let (status, text) = read_body(GatewayKind::Azki, response).await?;

        serde_json::from_str::<AzkiEnvelope>(&text)
            .map_err(|e| undecodable(GatewayKind::Azki, status, &text, e))
    }

    /// Classify the envelope's `rsCode`
    fn classify_result(&self, envelope: &AzkiEnvelope) -> Result<GatewayResponse> {
        let code = scalar_string(&envelope.rs_code)
            .ok_or_else(|| AppError::protocol(GatewayKind::Azki, "rsCode is not a scalar"))?;
        Ok(self.classifier.classify(CodeTable::AzkiResult, &code, ""))
    }
}

#[async_trait]
impl PaymentGateway for AzkiClient {
    fn kind(&self) -> GatewayKind {
        GatewayKind::Azki
    }

    async fn initiate(&self, request: &InitiateRequest) -> Result<GatewayResponse> {
        let body = PurchaseRequest {
            merchant_id: &self.config.merchant_id,
            amount: request.amount.value(),
            redirect_uri: callback_url(&self.config.callback_url, request.transaction_id)?,
            fallback_uri: callback_url(&self.config.fallback_url, request.transaction_id)?,
            provider_id: provider_id(),
            mobile_number: &self.config.user_mobile,
            items: &request.items,
        };

        let envelope = self.post(PURCHASE_PATH, &body).await?;
        let outcome = self.classify_result(&envelope)?;

        if !outcome.is_success() {
            return Err(AppError::rejected(
                outcome.outcome_code,
                outcome.message,
                outcome.retryable,
            ));
        }

        let result = envelope.result();
        let ticket_id = string_field(result, "ticket_id")
            .ok_or_else(|| AppError::protocol(GatewayKind::Azki, "missing result.ticket_id"))?;
        let payment_uri = string_field(result, "payment_uri")
            .ok_or_else(|| AppError::protocol(GatewayKind::Azki, "missing result.payment_uri"))?;

        Ok(outcome
            .with_reference(ticket_id)
            .with_redirect(RedirectDirective::url(payment_uri)))
    }

    async fn query_status(&self, request: &VerifyRequest) -> Result<Option<GatewayResponse>> {
        let envelope = self
            .post(STATUS_PATH, &json!({ "ticket_id": request.reference_id }))
            .await?;
        let outcome = self.classify_result(&envelope)?;

        if !outcome.is_success() {
            return Ok(Some(outcome.with_reference(request.reference_id.as_str())));
        }

        let status = scalar_field(envelope.result(), "status")
            .ok_or_else(|| AppError::protocol(GatewayKind::Azki, "missing result.status"))?;

        Ok(Some(
            self.classifier
                .classify(CodeTable::AzkiTicketStatus, &status, "")
                .with_reference(request.reference_id.as_str()),
        ))
    }

    async fn verify(&self, request: &VerifyRequest) -> Result<GatewayResponse> {
        let envelope = self
            .post(VERIFY_PATH, &json!({ "ticket_id": request.reference_id }))
            .await?;
        let outcome = self
            .classify_result(&envelope)?
            .with_reference(request.reference_id.as_str());

        if outcome.is_success() {
            // Azki issues no separate trace number; the ticket id is the audit code
            return Ok(outcome.with_tracking_code(request.reference_id.as_str()));
        }
        Ok(outcome)
    }
}

#[derive(Debug, Serialize)]
struct PurchaseRequest<'a> {
    merchant_id: &'a str,
    amount: u64,
    redirect_uri: String,
    fallback_uri: String,
    provider_id: u64,
    mobile_number: &'a str,
    items: &'a [InvoiceItem],
}

#[derive(Debug, Deserialize)]
struct AzkiEnvelope {
    #[serde(rename = "rsCode")]
    rs_code: Value,
    #[serde(default)]
    result: Value,
}

impl AzkiEnvelope {
    fn result(&self) -> &Value {
        &self.result
    }
}

fn provider_id() -> u64 {
    rand::thread_rng().gen_range(PROVIDER_ID_RANGE)
}

/// Strings and numbers as text; anything else is `None`
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn scalar_field(result: &Value, name: &str) -> Option<String> {
    result.get(name).and_then(scalar_string)
}

fn string_field(result: &Value, name: &str) -> Option<String> {
    scalar_field(result, name).filter(|value| !value.trim().is_empty())
}
