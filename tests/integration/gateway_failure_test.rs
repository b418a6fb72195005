// Transport and protocol failures, and verify preconditions

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::*;
use payport::config::AzkiConfig;
use payport::core::{AppError, Amount};
use payport::gateways::{build_client, AzkiClient};
use payport::transactions::{TransactionId, TransactionStatus, TransactionStore};
use payport::VerifyTarget;

/// Nothing listens on port 1
const DEAD_GATEWAY: &str = "http://127.0.0.1:1";

#[tokio::test]
async fn test_unreachable_gateway_fails_with_retry_hint() {
    let (mut port, store) = azki_port(DEAD_GATEWAY);
    let err = port.set(1_000).unwrap().ready().await.err().unwrap();

    assert!(matches!(err, AppError::PaymentInitiation(_)));
    assert!(matches!(err.root(), AppError::GatewayUnreachable { .. }));
    assert!(err.is_retryable());

    let id = port.transaction_id().unwrap();
    assert_eq!(
        store.find_by_id(id).await.unwrap().unwrap().status,
        TransactionStatus::Failed
    );
    assert_eq!(store.logs_for(id).await.unwrap()[0].code, "connection-error");
}

#[tokio::test]
async fn test_unreachable_soap_gateway() {
    let (mut port, _) = sadad_port(DEAD_GATEWAY);
    let err = port.set(1_000).unwrap().ready().await.err().unwrap();
    assert!(matches!(err.root(), AppError::GatewayUnreachable { .. }));
    assert_eq!(port.transaction().unwrap().status, TransactionStatus::Failed);
}

#[tokio::test]
async fn test_garbled_success_body_is_protocol_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/payment/purchase")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let (mut port, store) = azki_port(&server.url());
    let err = port.set(1_000).unwrap().ready().await.err().unwrap();

    assert!(matches!(err.root(), AppError::GatewayProtocol { .. }));
    assert!(!err.is_retryable());
    let id = port.transaction_id().unwrap();
    assert_eq!(store.logs_for(id).await.unwrap()[0].code, "invalid-response");
}

#[tokio::test]
async fn test_garbled_error_body_is_unreachable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/payment/purchase")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let (mut port, _) = azki_port(&server.url());
    let err = port.set(1_000).unwrap().ready().await.err().unwrap();
    assert!(matches!(err.root(), AppError::GatewayUnreachable { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_missing_ticket_is_protocol_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/payment/purchase")
        .with_status(200)
        .with_body(r#"{"rsCode": 0, "result": {"payment_uri": "https://pay"}}"#)
        .create_async()
        .await;

    let (mut port, _) = azki_port(&server.url());
    let err = port.set(1_000).unwrap().ready().await.err().unwrap();
    assert!(matches!(err.root(), AppError::GatewayProtocol { .. }));
    assert_eq!(port.transaction().unwrap().status, TransactionStatus::Failed);
}

#[tokio::test]
async fn test_invalid_signing_key_fails_before_any_request() {
    let mut server = mockito::Server::new_async().await;
    let purchase = server
        .mock("POST", "/payment/purchase")
        .expect(0)
        .create_async()
        .await;

    let config = AzkiConfig {
        api_key: "not-a-hex-key".to_string(),
        ..azki_config(&server.url())
    };
    let client = build_client(Duration::from_secs(5)).unwrap();
    let (mut port, store) = port_for(Arc::new(AzkiClient::with_clock(config, client, clock())));

    let err = port.set(1_000).unwrap().ready().await.err().unwrap();
    assert!(matches!(err, AppError::PaymentInitiation(_)));
    assert!(matches!(err.root(), AppError::Crypto(_)));
    assert!(!err.is_retryable());

    let id = port.transaction_id().unwrap();
    assert_eq!(
        store.find_by_id(id).await.unwrap().unwrap().status,
        TransactionStatus::Failed
    );
    assert_eq!(store.logs_for(id).await.unwrap()[0].code, "crypto-error");

    purchase.assert_async().await;
}

async fn ready_azki(server: &mut mockito::ServerGuard, ticket: &str) -> (payport::PaymentPort, payport::transactions::InMemoryTransactionStore) {
    server
        .mock("POST", "/payment/purchase")
        .with_status(200)
        .with_body(azki_purchase_ok(ticket))
        .create_async()
        .await;
    let (mut port, store) = azki_port(&server.url());
    port.set(40_000).unwrap().ready().await.unwrap();
    (port, store)
}

#[tokio::test]
async fn test_amount_mismatch_fails_without_gateway_call() {
    let mut server = mockito::Server::new_async().await;
    let (mut port, store) = ready_azki(&mut server, "R20").await;
    let status = server
        .mock("POST", "/payment/status")
        .expect(0)
        .create_async()
        .await;

    let id = port.transaction_id().unwrap();
    let target = VerifyTarget::new(id, "R20", Amount::new(1).unwrap());
    let err = port.verify(&target).await.err().unwrap();

    assert!(matches!(err, AppError::PaymentVerification(_)));
    assert!(matches!(err.root(), AppError::CallbackMismatch { .. }));
    assert_eq!(err.log_code(), "amount-mismatch");
    let logs = store.logs_for(id).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].code, "amount-mismatch");
    assert_eq!(
        store.find_by_id(id).await.unwrap().unwrap().status,
        TransactionStatus::Failed
    );

    status.assert_async().await;
}

#[tokio::test]
async fn test_verify_terminal_transaction_is_untouched() {
    let mut server = mockito::Server::new_async().await;
    let (mut port, store) = ready_azki(&mut server, "R21").await;

    let id = port.transaction_id().unwrap();
    let target = VerifyTarget::new(id, "R20", Amount::new(40_000).unwrap());
    port.verify(&target).await.err().unwrap();
    let before = store.find_by_id(id).await.unwrap().unwrap();

    let correct = VerifyTarget::new(id, "R21", Amount::new(40_000).unwrap());
    let err = port.verify(&correct).await.err().unwrap();
    assert!(matches!(err.root(), AppError::InvalidState(_)));

    assert_eq!(store.find_by_id(id).await.unwrap().unwrap(), before);
    assert_eq!(store.logs_for(id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_verify_unknown_transaction() {
    let (mut port, _) = azki_port(DEAD_GATEWAY);
    let target = VerifyTarget::new(TransactionId(99), "R1", Amount::new(1_000).unwrap());
    let err = port.verify(&target).await.err().unwrap();

    assert!(matches!(err, AppError::PaymentVerification(_)));
    assert!(matches!(err.root(), AppError::NotFound(_)));
}

#[tokio::test]
async fn test_verify_with_other_gateway_port() {
    let mut server = mockito::Server::new_async().await;
    let (port, store) = ready_azki(&mut server, "R22").await;
    let id = port.transaction_id().unwrap();

    let mut sadad = callback_port(sadad_gateway(DEAD_GATEWAY), &store);
    let err = sadad
        .verify(&VerifyTarget::new(id, "R22", Amount::new(40_000).unwrap()))
        .await
        .err()
        .unwrap();

    assert!(matches!(err.root(), AppError::Validation(_)));
    assert_eq!(
        store.find_by_id(id).await.unwrap().unwrap().status,
        TransactionStatus::Pending
    );
}
