use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::core::{AppError, Result};
use crate::modules::gateways::models::GatewayKind;
use crate::modules::transactions::models::TransactionId;

/// Longest slice of a response body quoted in error messages
const BODY_EXCERPT_LEN: usize = 256;

/// Shared HTTP client with the configured request timeout
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {}", e)))
}

/// Map a reqwest failure onto the gateway error taxonomy
pub(crate) fn transport_error(gateway: GatewayKind, e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::unreachable(gateway, format!("timeout ({})", e))
    } else if e.is_connect() {
        AppError::unreachable(gateway, format!("connection failed ({})", e))
    } else {
        AppError::unreachable(gateway, format!("request failed ({})", e))
    }
}

/// Read status and body, treating an unreadable body as a transport failure
pub(crate) async fn read_body(gateway: GatewayKind, response: Response) -> Result<(StatusCode, String)> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(gateway, e))?;
    Ok((status, body))
}

/// Error for a body we could not decode
///
/// Non-2xx answers are treated as the gateway being unavailable; a 2xx answer
/// we cannot read is a protocol break.
pub(crate) fn undecodable(gateway: GatewayKind, status: StatusCode, body: &str, reason: impl std::fmt::Display) -> AppError {
    if status.is_success() {
        AppError::protocol(gateway, format!("Failed to parse response: {}", reason))
    } else {
        AppError::unreachable(
            gateway,
            format!("HTTP {} ({})", status.as_u16(), excerpt(body)),
        )
    }
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

/// Append `transaction_id` to a callback URL, keeping its existing query
pub fn callback_url(base: &str, transaction_id: TransactionId) -> Result<String> {
    let mut url = Url::parse(base)
        .map_err(|e| AppError::configuration(format!("Invalid callback URL '{}': {}", base, e)))?;
    url.query_pairs_mut()
        .append_pair("transaction_id", &transaction_id.to_string());
    Ok(url.into())
}
