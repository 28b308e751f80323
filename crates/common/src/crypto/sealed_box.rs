//! Anonymous sealed boxes over X25519 + XChaCha20-Poly1305
//!
//! A sealed box lets anyone holding a recipient's public key encrypt a
//! message that only the recipient can open, without revealing who sent it.
//!
//! # Construction
//!
//! To seal a message for a recipient:
//! 1. **Generate ephemeral keypair**: a fresh X25519 secret per message
//! 2. **Perform ECDH**: ephemeral secret x recipient public key
//! 3. **Derive key**: BLAKE3 derive-key over `shared || ephemeral_pk || recipient_pk`
//! 4. **Derive nonce**: first 24 bytes of BLAKE3 over `ephemeral_pk || recipient_pk`
//! 5. **Encrypt**: XChaCha20-Poly1305 over the plaintext
//!
//! The recipient recomputes the same shared secret from their secret key
//! and the ephemeral public key found at the front of the box.
//!
//! # Wire Format
//!
//! ```text
//! [ ephemeral_pubkey: 32 bytes ][ ciphertext: len(plaintext) bytes ][ tag: 16 bytes ]
//! ```

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::Zeroize;

use super::keys::{SealingPublicKey, SealingSecretKey, SEALING_PUBLIC_KEY_SIZE};
use super::provider::{ProviderError, AEAD_TAG_SIZE, XNONCE_SIZE};

/// Bytes a sealed box adds on top of its plaintext
pub const SEAL_OVERHEAD: usize = SEALING_PUBLIC_KEY_SIZE + AEAD_TAG_SIZE;

const KEY_CONTEXT: &str = "sealpost sealed box v1 message key";

struct BoxParams {
    key: [u8; 32],
    nonce: [u8; XNONCE_SIZE],
}

impl Drop for BoxParams {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

fn box_params(
    shared: &[u8; 32],
    ephemeral_public: &[u8; SEALING_PUBLIC_KEY_SIZE],
    recipient_public: &[u8; SEALING_PUBLIC_KEY_SIZE],
) -> BoxParams {
    let mut key_hasher = blake3::Hasher::new_derive_key(KEY_CONTEXT);
    key_hasher.update(shared);
    key_hasher.update(ephemeral_public);
    key_hasher.update(recipient_public);
    let key = *key_hasher.finalize().as_bytes();

    let mut nonce_hasher = blake3::Hasher::new();
    nonce_hasher.update(ephemeral_public);
    nonce_hasher.update(recipient_public);
    let mut nonce = [0; XNONCE_SIZE];
    nonce_hasher.finalize_xof().fill(&mut nonce);

    BoxParams { key, nonce }
}

/// Seal `plaintext` to `recipient` using the given ephemeral secret
///
/// The ephemeral secret must be fresh for every message; callers normally
/// draw it from a CSPRNG (see [`CryptoProvider::seal`](super::CryptoProvider::seal)).
///
/// # Errors
///
/// Returns an error if the recipient key is a low-order point, which would
/// make the shared secret independent of the ephemeral key.
pub fn seal(
    recipient: &SealingPublicKey,
    plaintext: &[u8],
    ephemeral_secret: [u8; 32],
) -> Result<Vec<u8>, ProviderError> {
    let ephemeral = StaticSecret::from(ephemeral_secret);
    let ephemeral_public = X25519PublicKey::from(&ephemeral).to_bytes();
    let recipient_public = recipient.x25519();

    let shared = ephemeral.diffie_hellman(&recipient_public);
    if !shared.was_contributory() {
        return Err(ProviderError::InvalidPublicKey);
    }

    let params = box_params(shared.as_bytes(), &ephemeral_public, recipient_public.as_bytes());
    let cipher = XChaCha20Poly1305::new((&params.key).into());
    let ciphertext = cipher
        .encrypt(XNonce::from_slice(&params.nonce), plaintext)
        .map_err(|_| ProviderError::Encrypt)?;

    let mut out = Vec::with_capacity(SEALING_PUBLIC_KEY_SIZE + ciphertext.len());
    out.extend_from_slice(&ephemeral_public);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Open a sealed box with the recipient's secret key
///
/// # Errors
///
/// Returns [`ProviderError::Open`] if the box is truncated, was sealed to a
/// different key, or has been tampered with. The cases are not distinguished.
pub fn open(recipient: &SealingSecretKey, sealed: &[u8]) -> Result<Vec<u8>, ProviderError> {
    if sealed.len() < SEAL_OVERHEAD {
        return Err(ProviderError::Open);
    }

    let mut ephemeral_public = [0; SEALING_PUBLIC_KEY_SIZE];
    ephemeral_public.copy_from_slice(&sealed[..SEALING_PUBLIC_KEY_SIZE]);

    let secret = recipient.static_secret();
    let recipient_public = X25519PublicKey::from(&secret).to_bytes();
    let shared = secret.diffie_hellman(&X25519PublicKey::from(ephemeral_public));
    if !shared.was_contributory() {
        return Err(ProviderError::Open);
    }

    let params = box_params(shared.as_bytes(), &ephemeral_public, &recipient_public);
    let cipher = XChaCha20Poly1305::new((&params.key).into());
    cipher
        .decrypt(
            XNonce::from_slice(&params.nonce),
            &sealed[SEALING_PUBLIC_KEY_SIZE..],
        )
        .map_err(|_| ProviderError::Open)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_seal_and_open() {
        let recipient = SealingSecretKey::generate();
        let sealed = seal(&recipient.public_key(), b"hello, world!", [3u8; 32]).unwrap();
        assert_eq!(sealed.len(), b"hello, world!".len() + SEAL_OVERHEAD);

        let opened = open(&recipient, &sealed).unwrap();
        assert_eq!(opened, b"hello, world!");
    }

    #[test]
    fn test_seal_empty_plaintext() {
        let recipient = SealingSecretKey::generate();
        let sealed = seal(&recipient.public_key(), b"", [5u8; 32]).unwrap();
        assert_eq!(sealed.len(), SEAL_OVERHEAD);
        assert!(open(&recipient, &sealed).unwrap().is_empty());
    }

    #[test]
    fn test_ephemeral_key_changes_output() {
        let recipient = SealingSecretKey::generate().public_key();
        let a = seal(&recipient, b"same message", [1u8; 32]).unwrap();
        let b = seal(&recipient, b"same message", [2u8; 32]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_open_with_wrong_key_fails() {
        let alice = SealingSecretKey::generate();
        let bob = SealingSecretKey::generate();
        let sealed = seal(&alice.public_key(), b"for alice", [7u8; 32]).unwrap();
        assert!(matches!(open(&bob, &sealed), Err(ProviderError::Open)));
    }

    #[test]
    fn test_open_truncated_fails() {
        let recipient = SealingSecretKey::generate();
        let sealed = seal(&recipient.public_key(), b"abc", [8u8; 32]).unwrap();
        for len in [0, 1, SEALING_PUBLIC_KEY_SIZE, SEAL_OVERHEAD - 1, sealed.len() - 1] {
            assert!(open(&recipient, &sealed[..len]).is_err(), "length {len}");
        }
    }

    #[test]
    fn test_low_order_recipient_rejected() {
        // the identity point yields an all-zero shared secret
        let zero = SealingPublicKey::from([0u8; 32]);
        assert!(matches!(
            seal(&zero, b"nope", [4u8; 32]),
            Err(ProviderError::InvalidPublicKey)
        ));
    }
}
