//! Pluggable cryptographic primitives
//!
//! The engine never calls a crypto library directly. Everything it needs
//! is behind [`CryptoProvider`], so the primitives can be swapped for an
//! audited alternative or replaced with a test double.

use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use ed25519_dalek::{Signature, Signer};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use super::keys::{
    CryptographyKey, SealingPublicKey, SealingSecretKey, SharedAuthenticationKey,
    SharedEncryptionKey, SigningPublicKey, SigningSecretKey,
};
use super::sealed_box;

/// Size of an HMAC-SHA-512-256 tag in bytes
pub const MAC_SIZE: usize = 32;
/// Size of an Ed25519 signature in bytes
pub const SIGNATURE_SIZE: usize = 64;
/// Size of an XChaCha20-Poly1305 nonce in bytes
pub const XNONCE_SIZE: usize = 24;
/// Size of a Poly1305 authentication tag in bytes
pub const AEAD_TAG_SIZE: usize = 16;

type HmacSha512 = Hmac<Sha512>;

/// Errors raised by a [`CryptoProvider`]
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("secure random source failed: {0}")]
    Random(String),
    #[error("public key is not usable for key agreement")]
    InvalidPublicKey,
    #[error("encryption failed")]
    Encrypt,
    #[error("sealed box could not be opened")]
    Open,
    #[error("decryption failed")]
    Decrypt,
}

/// Cryptographic capabilities required by the message protection engine
///
/// Implementations must be safe to share between threads; the engine holds
/// one provider and calls it from whichever thread runs the operation.
pub trait CryptoProvider: Send + Sync {
    /// Fill `dest` from a cryptographically secure random source
    fn fill_random(&self, dest: &mut [u8]) -> Result<(), ProviderError>;

    /// Keyed hash of `message` (HMAC-SHA-512 truncated to 256 bits)
    fn mac(&self, key: &SharedAuthenticationKey, message: &[u8]) -> [u8; MAC_SIZE];

    /// Equality check whose running time does not depend on the contents
    fn ct_eq(&self, a: &[u8], b: &[u8]) -> bool;

    /// Detached Ed25519 signature over `message`
    fn sign(&self, key: &SigningSecretKey, message: &[u8]) -> [u8; SIGNATURE_SIZE];

    /// Verify a detached signature; malformed signatures or keys verify as false
    fn verify(&self, key: &SigningPublicKey, message: &[u8], signature: &[u8]) -> bool;

    /// Anonymously seal `plaintext` to `recipient`
    fn seal(&self, recipient: &SealingPublicKey, plaintext: &[u8])
        -> Result<Vec<u8>, ProviderError>;

    /// Open a sealed box addressed to `key`
    fn open(&self, key: &SealingSecretKey, sealed: &[u8]) -> Result<Vec<u8>, ProviderError>;

    /// Authenticated encryption under a shared key; output is `nonce || ciphertext || tag`
    fn encrypt(&self, key: &SharedEncryptionKey, plaintext: &[u8])
        -> Result<Vec<u8>, ProviderError>;

    /// Reverse of [`CryptoProvider::encrypt`]
    fn decrypt(&self, key: &SharedEncryptionKey, ciphertext: &[u8])
        -> Result<Vec<u8>, ProviderError>;
}

/// Provider backed by the RustCrypto and dalek crates and the OS random source
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProvider;

impl CryptoProvider for DefaultProvider {
    fn fill_random(&self, dest: &mut [u8]) -> Result<(), ProviderError> {
        getrandom::getrandom(dest).map_err(|e| ProviderError::Random(e.to_string()))
    }

    fn mac(&self, key: &SharedAuthenticationKey, message: &[u8]) -> [u8; MAC_SIZE] {
        let mut mac = <HmacSha512 as Mac>::new_from_slice(key.as_bytes())
            .expect("hmac accepts keys of any length");
        mac.update(message);
        let full = mac.finalize().into_bytes();

        let mut tag = [0; MAC_SIZE];
        tag.copy_from_slice(&full[..MAC_SIZE]);
        tag
    }

    fn ct_eq(&self, a: &[u8], b: &[u8]) -> bool {
        // slices of different lengths compare unequal without inspecting contents
        a.ct_eq(b).into()
    }

    fn sign(&self, key: &SigningSecretKey, message: &[u8]) -> [u8; SIGNATURE_SIZE] {
        key.signing_key().sign(message).to_bytes()
    }

    fn verify(&self, key: &SigningPublicKey, message: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };
        let Some(verifying_key) = key.verifying_key() else {
            return false;
        };
        verifying_key.verify_strict(message, &signature).is_ok()
    }

    fn seal(
        &self,
        recipient: &SealingPublicKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, ProviderError> {
        let mut ephemeral = [0; 32];
        self.fill_random(&mut ephemeral)?;
        let sealed = sealed_box::seal(recipient, plaintext, ephemeral);
        ephemeral.zeroize();
        sealed
    }

    fn open(&self, key: &SealingSecretKey, sealed: &[u8]) -> Result<Vec<u8>, ProviderError> {
        sealed_box::open(key, sealed)
    }

    fn encrypt(
        &self,
        key: &SharedEncryptionKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, ProviderError> {
        let mut nonce = [0; XNONCE_SIZE];
        self.fill_random(&mut nonce)?;

        let cipher = XChaCha20Poly1305::new_from_slice(key.as_bytes())
            .map_err(|_| ProviderError::Encrypt)?;
        let ciphertext = cipher
            .encrypt(
                XNonce::from_slice(&nonce),
                Payload {
                    msg: plaintext,
                    aad: &nonce,
                },
            )
            .map_err(|_| ProviderError::Encrypt)?;

        let mut out = Vec::with_capacity(XNONCE_SIZE + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decrypt(
        &self,
        key: &SharedEncryptionKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, ProviderError> {
        if ciphertext.len() < XNONCE_SIZE + AEAD_TAG_SIZE {
            return Err(ProviderError::Decrypt);
        }
        let (nonce, ciphertext) = ciphertext.split_at(XNONCE_SIZE);

        let cipher = XChaCha20Poly1305::new_from_slice(key.as_bytes())
            .map_err(|_| ProviderError::Decrypt)?;
        cipher
            .decrypt(
                XNonce::from_slice(nonce),
                Payload {
                    msg: ciphertext,
                    aad: nonce,
                },
            )
            .map_err(|_| ProviderError::Decrypt)
    }
}
