use http::header::{HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{decode_json_body, with_json_body, Engine, ProtectError};
use crate::codec::{self, SIGNATURE_HEADER};
use crate::crypto::{CryptoProvider, SigningPublicKey, SigningSecretKey};
use crate::message::HttpMessage;

impl<P: CryptoProvider> Engine<P> {
    /// Attach a detached Ed25519 signature of the body; the body is left unchanged
    pub fn sign<M: HttpMessage>(
        &self,
        message: M,
        key: &SigningSecretKey,
    ) -> Result<M, ProtectError> {
        let signature = self.provider.sign(key, message.body_bytes());
        let value = HeaderValue::from_str(&codec::encode(&signature))?;

        let mut message = message;
        message.set_header(HeaderName::from_static(SIGNATURE_HEADER), value);
        Ok(message)
    }

    /// Check the body against the signature header
    ///
    /// The message is accepted if any value of the header is a valid
    /// signature of the current body under `key`.
    ///
    /// # Errors
    ///
    /// - [`ProtectError::MissingProtectionHeader`] if the header is absent
    /// - [`ProtectError::InvalidSignature`] for a bad encoding, a bad
    ///   signature or the wrong public key alike
    pub fn verify_signed<M: HttpMessage>(
        &self,
        message: M,
        key: &SigningPublicKey,
    ) -> Result<M, ProtectError> {
        let accepted = {
            let values = message.header_values(SIGNATURE_HEADER);
            if values.is_empty() {
                tracing::debug!(header = SIGNATURE_HEADER, "protection header missing");
                return Err(ProtectError::MissingProtectionHeader(SIGNATURE_HEADER));
            }

            let body = message.body_bytes();
            values.iter().fold(false, |accepted, value| {
                let candidate = codec::decode(value).unwrap_or_default();
                self.provider.verify(key, body, &candidate) | accepted
            })
        };

        if !accepted {
            tracing::debug!(
                header = SIGNATURE_HEADER,
                body_len = message.body_bytes().len(),
                "rejected message signature"
            );
            return Err(ProtectError::InvalidSignature);
        }
        tracing::debug!(
            header = SIGNATURE_HEADER,
            body_len = message.body_bytes().len(),
            "accepted message signature"
        );
        Ok(message)
    }

    /// Replace the body with `value` as canonical JSON, then sign it
    pub fn sign_json<M, T>(
        &self,
        message: M,
        value: &T,
        key: &SigningSecretKey,
    ) -> Result<M, ProtectError>
    where
        M: HttpMessage,
        T: Serialize + ?Sized,
    {
        self.sign(with_json_body(message, value)?, key)
    }

    /// Verify the signature, then decode the body as JSON
    pub fn verify_signed_json<M, T>(
        &self,
        message: M,
        key: &SigningPublicKey,
    ) -> Result<T, ProtectError>
    where
        M: HttpMessage,
        T: DeserializeOwned,
    {
        let message = self.verify_signed(message, key)?;
        decode_json_body(&message)
    }
}
