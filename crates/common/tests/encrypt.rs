//! Integration tests for shared-key body encryption

mod common;

use http::{Method, StatusCode, Uri};
use serde_json::Value;

use ::common::prelude::*;

#[test]
fn test_encrypted_json_roundtrip() {
    let engine = Engine::new();
    let key = SharedEncryptionKey::generate();

    for obj in common::sample_objects() {
        let request = engine
            .create_encrypted_json_request(Method::POST, Uri::from_static("/"), &obj, &key)
            .unwrap();
        let decoded: Value = engine.decrypt_json(request, &key).unwrap();
        assert_eq!(decoded, obj);

        let response = engine
            .create_encrypted_json_response(StatusCode::OK, &obj, &key)
            .unwrap();
        let decoded: Value = engine.decrypt_json(response, &key).unwrap();
        assert_eq!(decoded, obj);
    }
}

#[test]
fn test_ciphertext_layout_and_freshness() {
    let engine = Engine::new();
    let key = SharedEncryptionKey::generate();

    let first = engine.encrypt(common::post("repeat"), &key).unwrap();
    let second = engine.encrypt(common::post("repeat"), &key).unwrap();

    // nonce (24) + ciphertext + tag (16)
    assert_eq!(first.body_bytes().len(), "repeat".len() + 40);
    assert_ne!(first.body_bytes(), second.body_bytes());
}

#[test]
fn test_wrong_key_is_rejected() {
    let engine = Engine::new();
    let key = SharedEncryptionKey::generate();
    let other = SharedEncryptionKey::generate();

    let encrypted = engine.encrypt(common::post("secret"), &key).unwrap();
    assert!(matches!(
        engine.decrypt(encrypted, &other),
        Err(ProtectError::DecryptionFailed)
    ));
}

#[test]
fn test_tampered_nonce_or_body_is_rejected() {
    let engine = Engine::new();
    let key = SharedEncryptionKey::generate();

    let encrypted = engine.encrypt(common::post("secret"), &key).unwrap();
    let len = encrypted.body_bytes().len();

    for index in [0, 23, 24, len - 1] {
        let tampered = common::flip_body_byte(
            http::Request::new(encrypted.body().clone()),
            index,
            0x01,
        );
        assert!(matches!(
            engine.decrypt(tampered, &key),
            Err(ProtectError::DecryptionFailed)
        ));
    }
}

#[test]
fn test_short_body_is_rejected() {
    let engine = Engine::new();
    let key = SharedEncryptionKey::generate();

    assert!(matches!(
        engine.decrypt(common::post(vec![0u8; 39]), &key),
        Err(ProtectError::DecryptionFailed)
    ));
}
