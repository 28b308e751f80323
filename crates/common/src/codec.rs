//! Header and body encodings
//!
//! Binary protection metadata (tags, signatures) travels in HTTP headers as
//! base64 with the URL-safe alphabet and no padding. Structured payloads are
//! serialized to canonical JSON before they are protected, so the bytes that
//! are signed are exactly the bytes that are sent.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Header carrying the HMAC-SHA-512-256 tag of the body
///
/// Header names are case-insensitive; on the wire this is `Body-HMAC-SHA512256`.
pub const AUTHENTICATION_HEADER: &str = "body-hmac-sha512256";

/// Header carrying the detached Ed25519 signature of the body
///
/// Header names are case-insensitive; on the wire this is `Body-Signature-Ed25519`.
pub const SIGNATURE_HEADER: &str = "body-signature-ed25519";

/// Content type set on JSON payloads
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type set when a JSON payload is replaced by a sealed or encrypted body
pub const OPAQUE_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid base64url encoding: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
}

/// Encode bytes as unpadded base64url text
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode unpadded base64url text
///
/// Accepts raw header bytes as well as strings. Padded input, non-canonical
/// trailing bits and non-ASCII bytes are rejected.
pub fn decode(text: impl AsRef<[u8]>) -> Result<Vec<u8>, CodecError> {
    Ok(URL_SAFE_NO_PAD.decode(text)?)
}

/// Serialize a value to canonical JSON bytes
///
/// Object members keep the order the value declares them in, and no
/// whitespace is emitted.
pub fn to_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(value)
}

/// Deserialize canonical JSON bytes back into a value
pub fn from_canonical_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// How a replaced (sealed or encrypted) body is laid out on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyEncoding {
    /// Ciphertext bytes as-is
    #[default]
    Raw,
    /// Ciphertext as base64url text, for transports that need a text-safe body
    Base64Url,
}

impl BodyEncoding {
    pub fn encode_body(&self, ciphertext: Vec<u8>) -> Bytes {
        match self {
            BodyEncoding::Raw => Bytes::from(ciphertext),
            BodyEncoding::Base64Url => Bytes::from(encode(&ciphertext)),
        }
    }

    pub fn decode_body(&self, body: &[u8]) -> Result<Vec<u8>, CodecError> {
        match self {
            BodyEncoding::Raw => Ok(body.to_vec()),
            BodyEncoding::Base64Url => {
                // non-UTF-8 bytes can never be valid base64, let the decoder reject them
                Ok(URL_SAFE_NO_PAD.decode(body)?)
            }
        }
    }
}
