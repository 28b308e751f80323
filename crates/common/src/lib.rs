//! Message protection for HTTP bodies
//!
//! Protects single, self-contained HTTP requests and responses with one of
//! four schemes: a shared-key MAC, an Ed25519 signature, an anonymous
//! sealed box, or shared-key authenticated encryption. The protection
//! travels with the message (one header, or a replaced body), so the body
//! bytes plus that header are all a verifier needs.

/**
 * Protection metadata encodings.
 *  - base64url header values
 *  - canonical JSON payloads
 */
pub mod codec;
/**
 * Engine configuration, loadable from
 *  any serde format.
 */
pub mod config;
/**
 * Cryptographic types and operations.
 *  - Fixed-length key types
 *  - The pluggable primitive provider
 *  - Anonymous sealed boxes
 */
pub mod crypto;
/**
 * Protect and verify operations over
 *  HTTP messages.
 */
pub mod engine;
/**
 * The minimal view of an HTTP message
 *  the engine relies on.
 */
pub mod message;
/**
 * Conversion of protected bodies into
 *  an HTTP stack's native body type.
 */
pub mod adapter;

pub mod prelude {
    pub use crate::adapter::{Adapter, GenericAdapter};
    pub use crate::codec::{BodyEncoding, AUTHENTICATION_HEADER, SIGNATURE_HEADER};
    pub use crate::config::EngineConfig;
    pub use crate::crypto::{
        AnyKey, CryptoProvider, CryptographyKey, DefaultProvider, KeyError, KeyKind,
        SealingPublicKey, SealingSecretKey, SharedAuthenticationKey, SharedEncryptionKey,
        SigningPublicKey, SigningSecretKey,
    };
    pub use crate::engine::{Engine, ProtectError};
    pub use crate::message::HttpMessage;
}
