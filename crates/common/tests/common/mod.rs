//! Shared test utilities for protection engine tests
#![allow(dead_code)]

use bytes::Bytes;
use common::codec;
use common::crypto::DefaultProvider;
use common::prelude::CryptoProvider;
use http::{Method, Request, Response, StatusCode};
use serde_json::{json, Value};

/// The structured value every pair must carry through unchanged
pub fn structured_sample() -> Value {
    json!({
        "structured": {
            "abc": "def",
            "o": null,
            "ghi": ["j", "k", "l"],
            "m": 1234,
            "n": 56.78,
            "p": {"q": {"r": {}}}
        }
    })
}

/// Sample payloads, from empty to nested
pub fn sample_objects() -> Vec<Value> {
    let mut random = vec![0u8; 1 + (random_byte() as usize % 100)];
    DefaultProvider.fill_random(&mut random).unwrap();

    vec![
        json!({}),
        json!({"test": "abcdefg"}),
        json!({"random": codec::encode(&random)}),
        structured_sample(),
    ]
}

fn random_byte() -> u8 {
    let mut byte = [0u8; 1];
    DefaultProvider.fill_random(&mut byte).unwrap();
    byte[0]
}

pub fn post(body: impl Into<Bytes>) -> Request<Bytes> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .body(body.into())
        .unwrap()
}

pub fn ok(body: impl Into<Bytes>) -> Response<Bytes> {
    Response::builder()
        .status(StatusCode::OK)
        .body(body.into())
        .unwrap()
}

/// Copy of `request` with one byte of the body XORed with `mask`
pub fn flip_body_byte(request: Request<Bytes>, index: usize, mask: u8) -> Request<Bytes> {
    request.map(|body| {
        let mut bytes = body.to_vec();
        bytes[index] ^= mask;
        Bytes::from(bytes)
    })
}

/// Install a test subscriber so engine debug logs show up with `--nocapture`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
