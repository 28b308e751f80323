//! Key model and cryptographic primitives for sealpost
//!
//! This module provides everything the protection engine needs below the
//! HTTP layer:
//!
//! - **Keys**: one fixed-length newtype per key kind, checked at construction
//! - **Symmetric authentication**: HMAC-SHA-512-256 over the message body
//! - **Signatures**: detached Ed25519 signatures over the message body
//! - **Sealing**: anonymous X25519 sealed boxes for a single recipient
//! - **Shared encryption**: XChaCha20-Poly1305 under a shared key
//!
//! # Key Kinds
//!
//! | Kind | Bytes | Derives |
//! |------|-------|---------|
//! | `SharedAuthenticationKey` | 32 | - |
//! | `SharedEncryptionKey` | 32 | - |
//! | `SigningSecretKey` | 64 | `SigningPublicKey` |
//! | `SigningPublicKey` | 32 | - |
//! | `SealingSecretKey` | 32 | `SealingPublicKey` |
//! | `SealingPublicKey` | 32 | - |
//!
//! Public keys are never generated directly; they are derived from their
//! secret half or parsed from bytes or text.

mod keys;
mod provider;
pub mod sealed_box;

pub use keys::{
    AnyKey, CryptographyKey, KeyError, KeyKind, SealingPublicKey, SealingSecretKey,
    SharedAuthenticationKey, SharedEncryptionKey, SigningPublicKey, SigningSecretKey,
    SEALING_PUBLIC_KEY_SIZE, SEALING_SECRET_KEY_SIZE, SHARED_AUTHENTICATION_KEY_SIZE,
    SHARED_ENCRYPTION_KEY_SIZE, SIGNING_PUBLIC_KEY_SIZE, SIGNING_SECRET_KEY_SIZE,
    SIGNING_SEED_SIZE,
};
pub use provider::{
    CryptoProvider, DefaultProvider, ProviderError, AEAD_TAG_SIZE, MAC_SIZE, SIGNATURE_SIZE,
    XNONCE_SIZE,
};
