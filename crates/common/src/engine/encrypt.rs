use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{decode_json_body, with_json_body, with_opaque_content_type, Engine, ProtectError};
use crate::crypto::{CryptoProvider, SharedEncryptionKey};
use crate::message::HttpMessage;

impl<P: CryptoProvider> Engine<P> {
    /// Replace the body with `nonce || XChaCha20-Poly1305(body)` under a shared key
    pub fn encrypt<M: HttpMessage>(
        &self,
        message: M,
        key: &SharedEncryptionKey,
    ) -> Result<M, ProtectError> {
        let ciphertext = self.provider.encrypt(key, message.body_bytes())?;
        let body = self.config.sealed_body_encoding.encode_body(ciphertext);
        Ok(message.with_body(body))
    }

    /// Decrypt the body and replace it with the recovered plaintext
    ///
    /// # Errors
    ///
    /// [`ProtectError::DecryptionFailed`] for a wrong key, a truncated or
    /// corrupted ciphertext, or a body that does not match the configured
    /// encoding.
    pub fn decrypt<M: HttpMessage>(
        &self,
        message: M,
        key: &SharedEncryptionKey,
    ) -> Result<M, ProtectError> {
        let decrypted = self
            .config
            .sealed_body_encoding
            .decode_body(message.body_bytes())
            .ok()
            .and_then(|ciphertext| self.provider.decrypt(key, &ciphertext).ok());

        match decrypted {
            Some(plaintext) => {
                tracing::debug!(
                    body_len = message.body_bytes().len(),
                    "accepted encrypted message"
                );
                Ok(message.with_body(plaintext.into()))
            }
            None => {
                tracing::debug!(
                    body_len = message.body_bytes().len(),
                    "rejected encrypted message"
                );
                Err(ProtectError::DecryptionFailed)
            }
        }
    }

    /// Replace the body with `value` as canonical JSON, then encrypt it
    pub fn encrypt_json<M, T>(
        &self,
        message: M,
        value: &T,
        key: &SharedEncryptionKey,
    ) -> Result<M, ProtectError>
    where
        M: HttpMessage,
        T: Serialize + ?Sized,
    {
        let message = self.encrypt(with_json_body(message, value)?, key)?;
        Ok(with_opaque_content_type(message))
    }

    /// Decrypt the body, then decode it as JSON
    pub fn decrypt_json<M, T>(&self, message: M, key: &SharedEncryptionKey) -> Result<T, ProtectError>
    where
        M: HttpMessage,
        T: DeserializeOwned,
    {
        let message = self.decrypt(message, key)?;
        decode_json_body(&message)
    }
}
