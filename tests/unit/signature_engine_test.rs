// Signature determinism and sensitivity to every input

use std::collections::HashSet;

use payport::core::AppError;
use payport::signatures::{SignatureContext, SignatureEngine};
use proptest::prelude::*;

const KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
const OTHER_KEY: &str = "1f1e1d1c1b1a191817161514131211100f0e0d0c0b0a09080706050403020100";

fn sign(subpath: &str, timestamp: i64, method: &str, key: &str) -> String {
    SignatureEngine
        .sign(SignatureContext {
            subpath,
            timestamp,
            http_method: method,
            secret_key: key,
        })
        .expect("Failed to sign")
}

/// Token for the purchase endpoint at a fixed time
#[test]
fn test_purchase_signature_vector() {
    assert_eq!(
        sign("/payment/purchase", 1_700_000_000, "POST", KEY),
        concat!(
            "c299081e7624b31e7c4dcb528e4e1881ad5135ece43fa3484f6290fe25ae5e5b",
            "60fe05e0f7ac475c3aa8a81bfcf8d30edc18707ffbff91c33bc19d8fb2b9d92c",
            "dd96485bdf4190e301209fd00476b4ebd18b639ac0d7dba975b99ffac51fbc21",
            "498c151deb662bdc476c118ad180e294"
        )
    );
}

/// Token for the verify endpoint at a fixed time
#[test]
fn test_verify_signature_vector() {
    assert_eq!(
        sign("/payment/verify", 1_700_000_000, "POST", KEY),
        concat!(
            "3332b6d7f8f6cf5852f8ba66b0eaa2ec75b7262968c0c95376c0d8eff9371910",
            "82265d93bc772e0cb3e49433db795b5b008b60b11352056af0a482409a8ca402",
            "9e6959eb0ab80aa47d9250a6d37c0f4eb429fd9eeb1b9e5267a4f769d5ddae9c",
            "edbe6f6aa8da2eed275ce82eaab4d013"
        )
    );
}

#[test]
fn test_rejects_bad_keys() {
    let not_hex = SignatureEngine.sign(SignatureContext {
        subpath: "/payment/purchase",
        timestamp: 1,
        http_method: "POST",
        secret_key: "zz",
    });
    assert!(matches!(not_hex, Err(AppError::Crypto(_))));

    // AES-128 sized key
    let short = SignatureEngine.sign(SignatureContext {
        subpath: "/payment/purchase",
        timestamp: 1,
        http_method: "POST",
        secret_key: "000102030405060708090a0b0c0d0e0f",
    });
    assert!(matches!(short, Err(AppError::Crypto(_))));
}

/// 1000 distinct inputs yield 1000 distinct tokens
#[test]
fn test_no_collisions_across_sample() {
    let mut seen = HashSet::new();
    for i in 0..1000i64 {
        let subpath = format!("/payment/{}", i % 10);
        let method = if i % 2 == 0 { "POST" } else { "GET" };
        let token = sign(&subpath, 1_700_000_000 + i, method, KEY);
        assert!(seen.insert(token), "collision at sample {}", i);
    }
    assert_eq!(seen.len(), 1000);
}

proptest! {
    /// Property: identical inputs produce identical tokens
    #[test]
    fn prop_signature_is_deterministic(
        subpath in "/[a-z/]{1,40}",
        timestamp in 0i64..4_000_000_000i64,
        method in prop::sample::select(vec!["GET", "POST", "PUT"]),
    ) {
        prop_assert_eq!(
            sign(&subpath, timestamp, method, KEY),
            sign(&subpath, timestamp, method, KEY)
        );
    }

    /// Property: changing any single argument changes the token
    #[test]
    fn prop_any_input_change_changes_token(
        subpath in "/[a-z]{1,30}",
        timestamp in 0i64..4_000_000_000i64,
    ) {
        let base = sign(&subpath, timestamp, "POST", KEY);

        prop_assert_ne!(&base, &sign(&format!("{}x", subpath), timestamp, "POST", KEY));
        prop_assert_ne!(&base, &sign(&subpath, timestamp + 1, "POST", KEY));
        prop_assert_ne!(&base, &sign(&subpath, timestamp, "GET", KEY));
        prop_assert_ne!(&base, &sign(&subpath, timestamp, "POST", OTHER_KEY));
    }
}
