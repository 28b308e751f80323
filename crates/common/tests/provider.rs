//! Tests for plugging a custom crypto provider into the engine

mod common;

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use ::common::crypto::{sealed_box, ProviderError, MAC_SIZE, SIGNATURE_SIZE};
use ::common::prelude::*;

/// Provider with a predictable random source, delegating everything else
#[derive(Debug, Default)]
struct CountingProvider {
    counter: AtomicU8,
}

impl CryptoProvider for CountingProvider {
    fn fill_random(&self, dest: &mut [u8]) -> Result<(), ProviderError> {
        let seed = self.counter.fetch_add(1, Ordering::SeqCst);
        for (i, byte) in dest.iter_mut().enumerate() {
            *byte = seed.wrapping_add(i as u8);
        }
        Ok(())
    }

    fn mac(&self, key: &SharedAuthenticationKey, message: &[u8]) -> [u8; MAC_SIZE] {
        DefaultProvider.mac(key, message)
    }

    fn ct_eq(&self, a: &[u8], b: &[u8]) -> bool {
        DefaultProvider.ct_eq(a, b)
    }

    fn sign(&self, key: &SigningSecretKey, message: &[u8]) -> [u8; SIGNATURE_SIZE] {
        DefaultProvider.sign(key, message)
    }

    fn verify(&self, key: &SigningPublicKey, message: &[u8], signature: &[u8]) -> bool {
        DefaultProvider.verify(key, message, signature)
    }

    fn seal(
        &self,
        recipient: &SealingPublicKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, ProviderError> {
        let mut ephemeral = [0; 32];
        self.fill_random(&mut ephemeral)?;
        sealed_box::seal(recipient, plaintext, ephemeral)
    }

    fn open(&self, key: &SealingSecretKey, sealed: &[u8]) -> Result<Vec<u8>, ProviderError> {
        DefaultProvider.open(key, sealed)
    }

    fn encrypt(
        &self,
        key: &SharedEncryptionKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, ProviderError> {
        DefaultProvider.encrypt(key, plaintext)
    }

    fn decrypt(
        &self,
        key: &SharedEncryptionKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, ProviderError> {
        DefaultProvider.decrypt(key, ciphertext)
    }
}

#[test]
fn test_custom_provider_drives_randomness() {
    let secret = SealingSecretKey::from_bytes(&[7u8; 32]).unwrap();
    let public = secret.public_key();

    let first = Engine::with_provider(CountingProvider::default());
    let second = Engine::with_provider(CountingProvider::default());

    let a = first.seal(common::post("same"), &public).unwrap();
    let b = second.seal(common::post("same"), &public).unwrap();
    assert_eq!(a.body_bytes(), b.body_bytes());

    // the next draw moves the counter, so the ephemeral key changes
    let c = first.seal(common::post("same"), &public).unwrap();
    assert_ne!(a.body_bytes(), c.body_bytes());

    // boxes from a custom provider open with the default one
    let opened = Engine::new().unseal(c, &secret).unwrap();
    assert_eq!(opened.body_bytes(), b"same");
}

#[test]
fn test_keys_from_custom_provider() {
    let provider = CountingProvider::default();
    let first = SharedAuthenticationKey::generate_with(&provider).unwrap();
    let second = SharedAuthenticationKey::generate_with(&provider).unwrap();

    assert_eq!(first.as_bytes()[0], 0);
    assert_eq!(second.as_bytes()[0], 1);
    assert_ne!(first, second);
}

#[test]
fn test_engine_is_shared_across_threads() {
    let engine = Arc::new(Engine::new());
    let key = Arc::new(SharedAuthenticationKey::generate());
    let signer = Arc::new(SigningSecretKey::generate());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let key = Arc::clone(&key);
            let signer = Arc::clone(&signer);
            std::thread::spawn(move || {
                let body = format!("message {i}");
                let request = engine.authenticate(common::post(body.clone()), &key).unwrap();
                let request = engine.sign(request, &signer).unwrap();

                let request = engine.verify_authenticated(request, &key).unwrap();
                let request = engine.verify_signed(request, &signer.public_key()).unwrap();
                assert_eq!(request.body_bytes(), body.as_bytes());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
