//! The message protection engine
//!
//! Four independent protect/verify pairs, each a pure function of the
//! message, the key and (for operations that need fresh randomness) the
//! provider's random source:
//!
//! | Pair | Key(s) | Carries protection in |
//! |------|--------|-----------------------|
//! | `authenticate` / `verify_authenticated` | `SharedAuthenticationKey` | `Body-HMAC-SHA512256` header |
//! | `sign` / `verify_signed` | `SigningSecretKey` / `SigningPublicKey` | `Body-Signature-Ed25519` header |
//! | `seal` / `unseal` | `SealingPublicKey` / `SealingSecretKey` | replaced body |
//! | `encrypt` / `decrypt` | `SharedEncryptionKey` | replaced body |
//!
//! Each pair also has a JSON variant that serializes a value to canonical
//! JSON before protecting it and decodes it again only after the
//! cryptographic check has passed.
//!
//! Verification either returns fully verified data or a single error value.
//! Cryptographic failures never say which sub-check failed: a malformed
//! header value is reported exactly like a wrong tag or signature.

mod authenticate;
mod builder;
mod encrypt;
mod seal;
mod sign;

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::{self, JSON_CONTENT_TYPE, OPAQUE_CONTENT_TYPE};
use crate::config::EngineConfig;
use crate::crypto::{CryptoProvider, DefaultProvider, ProviderError};
use crate::message::HttpMessage;

/// Errors returned by protect and verify operations
#[derive(Debug, thiserror::Error)]
pub enum ProtectError {
    #[error("message is missing the {0} header")]
    MissingProtectionHeader(&'static str),
    #[error("message authentication failed")]
    InvalidAuthentication,
    #[error("message signature is invalid")]
    InvalidSignature,
    #[error("sealed message could not be opened")]
    SealOpenFailed,
    #[error("encrypted message could not be decrypted")]
    DecryptionFailed,
    #[error("failed to encode payload: {0}")]
    PayloadEncodeFailed(#[source] serde_json::Error),
    #[error("failed to decode payload: {0}")]
    PayloadDecodeFailed(#[source] serde_json::Error),
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
    #[error("crypto provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Stateless protect/verify engine bound to a crypto provider
///
/// The engine holds no per-message state; one instance can be shared
/// freely between threads and reused for any number of messages.
///
/// # Examples
///
/// ```ignore
/// let engine = Engine::new();
/// let key = SharedAuthenticationKey::generate();
///
/// let request = engine.create_authenticated_json_request(
///     Method::POST,
///     Uri::from_static("/orders"),
///     &json!({"id": 7}),
///     &key,
/// )?;
///
/// let order: serde_json::Value = engine.verify_authenticated_json(request, &key)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine<P = DefaultProvider> {
    provider: P,
    config: EngineConfig,
}

impl Engine<DefaultProvider> {
    /// Engine over the default provider with default configuration
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: CryptoProvider> Engine<P> {
    /// Engine over a custom provider
    pub fn with_provider(provider: P) -> Self {
        Self {
            provider,
            config: EngineConfig::default(),
        }
    }

    /// Replace the engine configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Replace the body of a message with the canonical JSON form of `value`
fn with_json_body<M, T>(message: M, value: &T) -> Result<M, ProtectError>
where
    M: HttpMessage,
    T: Serialize + ?Sized,
{
    let json = codec::to_canonical_json(value).map_err(ProtectError::PayloadEncodeFailed)?;
    let mut message = message.with_body(Bytes::from(json));
    message.set_header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    Ok(message)
}

/// Mark a message whose JSON body was replaced by ciphertext
fn with_opaque_content_type<M: HttpMessage>(message: M) -> M {
    let mut message = message;
    message.set_header(CONTENT_TYPE, HeaderValue::from_static(OPAQUE_CONTENT_TYPE));
    message
}

/// Decode the body of an already verified message
fn decode_json_body<M, T>(message: &M) -> Result<T, ProtectError>
where
    M: HttpMessage,
    T: DeserializeOwned,
{
    codec::from_canonical_json(message.body_bytes()).map_err(ProtectError::PayloadDecodeFailed)
}
