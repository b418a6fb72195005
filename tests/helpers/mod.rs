// Test Helpers for Gateway Flow Tests
//
// Remote gateways are stubbed with mockito servers. Transactions live in an
// in-memory store, so every test only sees its own records.
//
// Usage:
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//
//   let mut server = mockito::Server::new_async().await;
//   let (port, store) = helpers::azki_port(&server.url());

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use payport::config::{AzkiConfig, SadadConfig};
use payport::core::FixedClock;
use payport::gateways::{build_client, AzkiClient, PaymentGateway, SadadClient};
use payport::transactions::{InMemoryTransactionStore, TransactionId};
use payport::PaymentPort;

/// 32-byte Azki key 00..1f
pub const API_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

/// Fixed signing time for every request
pub const SIGNED_AT: i64 = 1_700_000_000;

pub const PURCHASE_SIGNATURE: &str = concat!(
    "c299081e7624b31e7c4dcb528e4e1881ad5135ece43fa3484f6290fe25ae5e5b",
    "60fe05e0f7ac475c3aa8a81bfcf8d30edc18707ffbff91c33bc19d8fb2b9d92c",
    "dd96485bdf4190e301209fd00476b4ebd18b639ac0d7dba975b99ffac51fbc21",
    "498c151deb662bdc476c118ad180e294"
);

pub const STATUS_SIGNATURE: &str = concat!(
    "60866f2d8d7380b1c2a48350dfb491389ee2ec65bf0b0894a858b6daf99309c4",
    "4954bbe345a4f49775026e619321addb4fa7a23e1930dcf010a657e1b5002d40",
    "5451d6167830405db0ccee6b0ac9879093985d4d92190f4265a353391850482f",
    "1b0d807a897e13460c070d1510c0e696"
);

pub const VERIFY_SIGNATURE: &str = concat!(
    "3332b6d7f8f6cf5852f8ba66b0eaa2ec75b7262968c0c95376c0d8eff9371910",
    "82265d93bc772e0cb3e49433db795b5b008b60b11352056af0a482409a8ca402",
    "9e6959eb0ab80aa47d9250a6d37c0f4eb429fd9eeb1b9e5267a4f769d5ddae9c",
    "edbe6f6aa8da2eed275ce82eaab4d013"
);

pub const MERCHANT_ID: &str = "azki-merchant-1";
pub const AZKI_CALLBACK: &str = "https://shop.example/azki/callback";
pub const SADAD_CALLBACK: &str = "https://shop.example/sadad/callback";
pub const SADAD_PATH: &str = "/services/MerchantUtility.asmx";

pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::at_timestamp(SIGNED_AT).unwrap())
}

pub fn azki_config(base_url: &str) -> AzkiConfig {
    AzkiConfig::new(MERCHANT_ID, API_KEY, AZKI_CALLBACK).with_base_url(base_url)
}

pub fn sadad_config(base_url: &str) -> SadadConfig {
    SadadConfig::new("sadad-merchant", "24000615", "c2FkYWQta2V5", SADAD_CALLBACK)
        .with_service_url(format!("{}{}", base_url, SADAD_PATH))
}

fn http_client() -> reqwest::Client {
    build_client(Duration::from_secs(5)).unwrap()
}

pub fn azki_gateway(base_url: &str) -> Arc<dyn PaymentGateway> {
    Arc::new(AzkiClient::with_clock(azki_config(base_url), http_client(), clock()))
}

pub fn sadad_gateway(base_url: &str) -> Arc<dyn PaymentGateway> {
    Arc::new(SadadClient::new(sadad_config(base_url), http_client()))
}

pub fn port_for(gateway: Arc<dyn PaymentGateway>) -> (PaymentPort, InMemoryTransactionStore) {
    let store = InMemoryTransactionStore::new();
    let port = PaymentPort::with_clock(gateway, Arc::new(store.clone()), clock());
    (port, store)
}

pub fn azki_port(base_url: &str) -> (PaymentPort, InMemoryTransactionStore) {
    port_for(azki_gateway(base_url))
}

pub fn sadad_port(base_url: &str) -> (PaymentPort, InMemoryTransactionStore) {
    port_for(sadad_gateway(base_url))
}

/// Second port over the same store, as a callback handler would build it
pub fn callback_port(
    gateway: Arc<dyn PaymentGateway>,
    store: &InMemoryTransactionStore,
) -> PaymentPort {
    PaymentPort::with_clock(gateway, Arc::new(store.clone()), clock())
}

pub fn azki_purchase_ok(ticket_id: &str) -> String {
    serde_json::json!({
        "rsCode": 0,
        "result": {
            "ticket_id": ticket_id,
            "payment_uri": format!("https://pay.azkiloan.com/{}", ticket_id)
        }
    })
    .to_string()
}

pub fn azki_status(status: u8) -> String {
    serde_json::json!({ "rsCode": 0, "result": { "status": status } }).to_string()
}

pub fn azki_result(rs_code: u32) -> String {
    serde_json::json!({ "rsCode": rs_code, "result": {} }).to_string()
}

fn soap(body: &str) -> String {
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>",
            "<soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">",
            "<soap:Body>{}</soap:Body></soap:Envelope>"
        ),
        body
    )
}

pub const SADAD_FORM: &str =
    "<form action=\"https://sadad.shaparak.ir/Purchase\" method=\"post\"><input type=\"hidden\" name=\"token\" value=\"RK-1\"/></form>";

pub fn sadad_payment_ok(request_key: &str) -> String {
    soap(&format!(
        concat!(
            "<PaymentUtilityResponse xmlns=\"http://tempuri.org/\">",
            "<PaymentUtilityResult>{}</PaymentUtilityResult>",
            "<RequestKey>{}</RequestKey>",
            "</PaymentUtilityResponse>"
        ),
        quick_xml::escape::escape(SADAD_FORM),
        request_key
    ))
}

pub fn sadad_payment_without_key() -> String {
    soap(&format!(
        concat!(
            "<PaymentUtilityResponse xmlns=\"http://tempuri.org/\">",
            "<PaymentUtilityResult>{}</PaymentUtilityResult>",
            "</PaymentUtilityResponse>"
        ),
        quick_xml::escape::escape(SADAD_FORM)
    ))
}

pub fn sadad_status(code: &str, description: &str, trace_no: &str, card: &str) -> String {
    soap(&format!(
        concat!(
            "<CheckRequestStatusResultResponse xmlns=\"http://tempuri.org/\">",
            "<CheckRequestStatusResultResult>",
            "<AppStatusCode>{}</AppStatusCode>",
            "<AppStatusDescription>{}</AppStatusDescription>",
            "<TraceNo>{}</TraceNo>",
            "<CustomerCardNumber>{}</CustomerCardNumber>",
            "</CheckRequestStatusResultResult>",
            "</CheckRequestStatusResultResponse>"
        ),
        code, description, trace_no, card
    ))
}

pub fn soap_fault(code: &str, message: &str) -> String {
    soap(&format!(
        "<soap:Fault><faultcode>{}</faultcode><faultstring>{}</faultstring></soap:Fault>",
        code, message
    ))
}

/// Callback URL the gateway was told to return to
pub fn expected_callback(base: &str, id: TransactionId) -> String {
    format!("{}?transaction_id={}", base, id)
}
