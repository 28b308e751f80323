//! Integration tests for Ed25519 body signatures

mod common;

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{Method, StatusCode, Uri};
use serde_json::{json, Value};

use ::common::codec::{self, SIGNATURE_HEADER};
use ::common::prelude::*;

#[test]
fn test_signed_json_request_roundtrip() {
    common::init_tracing();
    let engine = Engine::new();
    let secret = SigningSecretKey::generate();
    let public = secret.public_key();

    for obj in common::sample_objects() {
        let request = engine
            .create_signed_json_request(Method::PUT, Uri::from_static("/items/1"), &obj, &secret)
            .unwrap();
        let decoded: Value = engine.verify_signed_json(request, &public).unwrap();
        assert_eq!(decoded, obj);
    }
}

#[test]
fn test_signed_response_roundtrip() {
    let engine = Engine::new();
    let secret = SigningSecretKey::generate();

    let response = engine
        .create_signed_response(StatusCode::CREATED, "created", &secret)
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let verified = engine
        .verify_signed(response, &secret.public_key())
        .unwrap();
    assert_eq!(verified.body_bytes(), b"created");
}

#[test]
fn test_signature_header_is_64_bytes() {
    let engine = Engine::new();
    let secret = SigningSecretKey::generate();

    let request = engine.sign(common::post("body"), &secret).unwrap();
    let signature = codec::decode(request.header_values(SIGNATURE_HEADER)[0]).unwrap();
    assert_eq!(signature.len(), 64);
}

#[test]
fn test_swapped_body_is_rejected() {
    let engine = Engine::new();
    let secret = SigningSecretKey::generate();
    let public = secret.public_key();

    for obj in common::sample_objects() {
        let mut bad = obj.clone();
        bad["bad"] = json!(true);

        let request = engine
            .sign_json(common::post(""), &obj, &secret)
            .unwrap()
            .with_body(Bytes::from(serde_json::to_vec(&bad).unwrap()));

        assert!(matches!(
            engine.verify_signed(request, &public),
            Err(ProtectError::InvalidSignature)
        ));
    }
}

#[test]
fn test_other_signer_is_rejected() {
    let engine = Engine::new();
    let secret = SigningSecretKey::generate();
    let other = SigningSecretKey::generate();

    let request = engine.sign(common::post("payload"), &secret).unwrap();
    assert!(matches!(
        engine.verify_signed(request, &other.public_key()),
        Err(ProtectError::InvalidSignature)
    ));
}

#[test]
fn test_undecodable_header_is_rejected() {
    let engine = Engine::new();
    let secret = SigningSecretKey::generate();

    let mut request = engine.sign(common::post("payload"), &secret).unwrap();
    request.set_header(
        HeaderName::from_static(SIGNATURE_HEADER),
        HeaderValue::from_static("!!not base64!!"),
    );
    assert!(matches!(
        engine.verify_signed(request, &secret.public_key()),
        Err(ProtectError::InvalidSignature)
    ));
}

#[test]
fn test_missing_header_is_reported() {
    let engine = Engine::new();
    let secret = SigningSecretKey::generate();

    assert!(matches!(
        engine.verify_signed(common::ok("plain"), &secret.public_key()),
        Err(ProtectError::MissingProtectionHeader(SIGNATURE_HEADER))
    ));
}

#[test]
fn test_signing_is_deterministic() {
    let engine = Engine::new();
    let secret = SigningSecretKey::generate();

    let first = engine.sign(common::post("same"), &secret).unwrap();
    let second = engine.sign(common::post("same"), &secret).unwrap();
    assert_eq!(
        first.header_values(SIGNATURE_HEADER),
        second.header_values(SIGNATURE_HEADER)
    );
}

#[test]
fn test_verified_non_json_body_is_a_decode_error() {
    let engine = Engine::new();
    let secret = SigningSecretKey::generate();

    let request = engine.sign(common::post("plain text"), &secret).unwrap();
    let result: Result<Value, _> = engine.verify_signed_json(request, &secret.public_key());
    assert!(matches!(result, Err(ProtectError::PayloadDecodeFailed(_))));
}

#[test]
fn test_tampered_non_json_body_fails_signature_before_decoding() {
    let engine = Engine::new();
    let secret = SigningSecretKey::generate();

    let request = engine.sign(common::post("plain text"), &secret).unwrap();
    let tampered = common::flip_body_byte(request, 3, 0x20);

    let result: Result<Value, _> = engine.verify_signed_json(tampered, &secret.public_key());
    assert!(matches!(result, Err(ProtectError::InvalidSignature)));
}
