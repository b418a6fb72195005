use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;

use super::gateway_trait::PaymentGateway;
use super::http::{callback_url, read_body, transport_error, undecodable};
use super::soap;
use crate::config::SadadConfig;
use crate::core::{AppError, Result};
use crate::modules::classifier::{CodeTable, GatewayResponse, OutcomeCategory, ResponseClassifier};
use crate::modules::gateways::models::{
    GatewayKind, InitiateRequest, RedirectDirective, VerifyRequest,
};

const SOAP_NAMESPACE: &str = "http://tempuri.org/";
const PAYMENT_OPERATION: &str = "PaymentUtility";
const STATUS_OPERATION: &str = "CheckRequestStatusResult";

/// Sadad (Bank Melli) gateway client
///
/// SOAP over HTTP against the MerchantUtility service. Purchase returns an
/// HTML form the payer's browser must post; verification echoes merchant,
/// terminal and amount so the bank can cross-check them.
pub struct SadadClient {
    client: Client,
    config: SadadConfig,
    classifier: ResponseClassifier,
}

impl SadadClient {
    /// Create a new Sadad client
    pub fn new(config: SadadConfig, client: Client) -> Self {
        Self {
            client,
            config,
            classifier: ResponseClassifier,
        }
    }

    /// Invoke a SOAP operation and flatten the response fields
    async fn call(&self, operation: &str, params: &[(&str, String)]) -> Result<HashMap<String, String>> {
        let envelope = soap::envelope(operation, SOAP_NAMESPACE, params);

        tracing::debug!(gateway = "sadad", operation = operation, "Sending gateway request");

        let response = self
            .client
            .post(&self.config.service_url)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", soap::action(SOAP_NAMESPACE, operation))
            .body(envelope)
            .send()
            .await
            .map_err(|e| transport_error(GatewayKind::Sadad, e))?;

        let (status, text) = read_body(GatewayKind::Sadad, response).await?;

        let fields = soap::parse_fields(&text)
            .map_err(|e| undecodable(GatewayKind::Sadad, status, &text, e))?;

        if let Some(fault) = soap::field(&fields, "faultstring") {
            let code = soap::field(&fields, "faultcode").unwrap_or("soap-fault");
            return Err(AppError::rejected(code, fault, soap::is_server_fault(code)));
        }

        if !status.is_success() {
            return Err(AppError::unreachable(
                GatewayKind::Sadad,
                format!("HTTP {}", status.as_u16()),
            ));
        }

        Ok(fields)
    }

    fn credentials(&self) -> (String, String, String) {
        (
            self.config.merchant.clone(),
            self.config.terminal_id.clone(),
            self.config.transaction_key.clone(),
        )
    }
}

#[async_trait]
impl PaymentGateway for SadadClient {
    fn kind(&self) -> GatewayKind {
        GatewayKind::Sadad
    }

    async fn initiate(&self, request: &InitiateRequest) -> Result<GatewayResponse> {
        let (merchant, terminal_id, transaction_key) = self.credentials();
        let return_url = callback_url(&self.config.callback_url, request.transaction_id)?;

        // Positional order of the WSDL operation
        let params = [
            ("MerchantID", merchant),
            ("Amount", request.amount.to_string()),
            ("OrderId", request.transaction_id.to_string()),
            ("TransactionKey", transaction_key),
            ("TerminalID", terminal_id),
            ("ReturnUrl", return_url),
        ];

        let fields = self.call(PAYMENT_OPERATION, &params).await?;

        let (Some(request_key), Some(form)) = (
            soap::field(&fields, "RequestKey"),
            soap::field(&fields, "PaymentUtilityResult"),
        ) else {
            return Err(AppError::protocol(
                GatewayKind::Sadad,
                "Invalid response: RequestKey or PaymentUtilityResult missing",
            ));
        };

        Ok(GatewayResponse::accepted()
            .with_reference(request_key)
            .with_redirect(RedirectDirective::auto_submit_form(form)))
    }

    async fn verify(&self, request: &VerifyRequest) -> Result<GatewayResponse> {
        let (merchant, terminal_id, transaction_key) = self.credentials();

        let params = [
            ("orderId", request.transaction_id.to_string()),
            ("MerchantID", merchant),
            ("TerminalID", terminal_id),
            ("TransactionKey", transaction_key),
            ("RequestKey", request.reference_id.clone()),
            ("Amount", request.amount.to_string()),
        ];

        let fields = self.call(STATUS_OPERATION, &params).await?;

        let code = soap::field(&fields, "AppStatusCode").ok_or_else(|| {
            AppError::protocol(GatewayKind::Sadad, "Failed to receive transaction status from bank")
        })?;
        let description = soap::field(&fields, "AppStatusDescription").unwrap_or_default();

        let outcome = self
            .classifier
            .classify(CodeTable::SadadStatus, code, description)
            .with_reference(request.reference_id.as_str())
            .with_card_number(soap::field(&fields, "CustomerCardNumber").map(str::to_string));

        if outcome.category != OutcomeCategory::Success {
            return Ok(outcome);
        }

        let trace_no = soap::field(&fields, "TraceNo").ok_or_else(|| {
            AppError::protocol(GatewayKind::Sadad, "Committed transaction without TraceNo")
        })?;
        Ok(outcome.with_tracking_code(trace_no))
    }
}
