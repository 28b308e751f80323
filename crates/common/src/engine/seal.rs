use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{decode_json_body, with_json_body, with_opaque_content_type, Engine, ProtectError};
use crate::crypto::{CryptoProvider, SealingPublicKey, SealingSecretKey};
use crate::message::HttpMessage;

impl<P: CryptoProvider> Engine<P> {
    /// Replace the body with a sealed box addressed to `recipient`
    ///
    /// No header is added; the ephemeral public key travels inside the box.
    /// The box is laid out according to the configured body encoding.
    pub fn seal<M: HttpMessage>(
        &self,
        message: M,
        recipient: &SealingPublicKey,
    ) -> Result<M, ProtectError> {
        let sealed = self.provider.seal(recipient, message.body_bytes())?;
        let body = self.config.sealed_body_encoding.encode_body(sealed);
        Ok(message.with_body(body))
    }

    /// Open a sealed body and replace it with the recovered plaintext
    ///
    /// # Errors
    ///
    /// [`ProtectError::SealOpenFailed`] for a wrong key, a truncated or
    /// corrupted box, or a body that does not match the configured encoding.
    pub fn unseal<M: HttpMessage>(
        &self,
        message: M,
        key: &SealingSecretKey,
    ) -> Result<M, ProtectError> {
        let opened = self
            .config
            .sealed_body_encoding
            .decode_body(message.body_bytes())
            .ok()
            .and_then(|sealed| self.provider.open(key, &sealed).ok());

        match opened {
            Some(plaintext) => {
                tracing::debug!(
                    body_len = message.body_bytes().len(),
                    "accepted sealed message"
                );
                Ok(message.with_body(plaintext.into()))
            }
            None => {
                tracing::debug!(
                    body_len = message.body_bytes().len(),
                    "rejected sealed message"
                );
                Err(ProtectError::SealOpenFailed)
            }
        }
    }

    /// Replace the body with `value` as canonical JSON, then seal it
    pub fn seal_json<M, T>(
        &self,
        message: M,
        value: &T,
        recipient: &SealingPublicKey,
    ) -> Result<M, ProtectError>
    where
        M: HttpMessage,
        T: Serialize + ?Sized,
    {
        let message = self.seal(with_json_body(message, value)?, recipient)?;
        Ok(with_opaque_content_type(message))
    }

    /// Unseal the body, then decode it as JSON
    pub fn unseal_json<M, T>(&self, message: M, key: &SealingSecretKey) -> Result<T, ProtectError>
    where
        M: HttpMessage,
        T: DeserializeOwned,
    {
        let message = self.unseal(message, key)?;
        decode_json_body(&message)
    }
}
