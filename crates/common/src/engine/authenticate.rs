use http::header::{HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{decode_json_body, with_json_body, Engine, ProtectError};
use crate::codec::{self, AUTHENTICATION_HEADER};
use crate::crypto::{CryptoProvider, SharedAuthenticationKey};
use crate::message::HttpMessage;

impl<P: CryptoProvider> Engine<P> {
    /// Attach an HMAC-SHA-512-256 tag of the body; the body is left unchanged
    pub fn authenticate<M: HttpMessage>(
        &self,
        message: M,
        key: &SharedAuthenticationKey,
    ) -> Result<M, ProtectError> {
        let tag = self.provider.mac(key, message.body_bytes());
        let value = HeaderValue::from_str(&codec::encode(&tag))?;

        let mut message = message;
        message.set_header(HeaderName::from_static(AUTHENTICATION_HEADER), value);
        Ok(message)
    }

    /// Check the body against the authentication header
    ///
    /// The tag is recomputed over the current body and compared in constant
    /// time with every value of the header. The message is accepted if any
    /// value matches.
    ///
    /// # Errors
    ///
    /// - [`ProtectError::MissingProtectionHeader`] if the header is absent
    /// - [`ProtectError::InvalidAuthentication`] for any mismatch, including
    ///   header values that are not valid base64url
    pub fn verify_authenticated<M: HttpMessage>(
        &self,
        message: M,
        key: &SharedAuthenticationKey,
    ) -> Result<M, ProtectError> {
        let accepted = {
            let values = message.header_values(AUTHENTICATION_HEADER);
            if values.is_empty() {
                tracing::debug!(header = AUTHENTICATION_HEADER, "protection header missing");
                return Err(ProtectError::MissingProtectionHeader(AUTHENTICATION_HEADER));
            }

            let expected = self.provider.mac(key, message.body_bytes());
            // every value is checked, no early exit on the first match
            values.iter().fold(false, |accepted, value| {
                let candidate = codec::decode(value).unwrap_or_default();
                self.provider.ct_eq(&expected, &candidate) | accepted
            })
        };

        if !accepted {
            tracing::debug!(
                header = AUTHENTICATION_HEADER,
                body_len = message.body_bytes().len(),
                "rejected message authentication"
            );
            return Err(ProtectError::InvalidAuthentication);
        }
        tracing::debug!(
            header = AUTHENTICATION_HEADER,
            body_len = message.body_bytes().len(),
            "accepted message authentication"
        );
        Ok(message)
    }

    /// Replace the body with `value` as canonical JSON, then authenticate it
    pub fn authenticate_json<M, T>(
        &self,
        message: M,
        value: &T,
        key: &SharedAuthenticationKey,
    ) -> Result<M, ProtectError>
    where
        M: HttpMessage,
        T: Serialize + ?Sized,
    {
        self.authenticate(with_json_body(message, value)?, key)
    }

    /// Verify the message, then decode its body as JSON
    ///
    /// Decoding is only attempted once authentication has succeeded.
    pub fn verify_authenticated_json<M, T>(
        &self,
        message: M,
        key: &SharedAuthenticationKey,
    ) -> Result<T, ProtectError>
    where
        M: HttpMessage,
        T: DeserializeOwned,
    {
        let message = self.verify_authenticated(message, key)?;
        decode_json_body(&message)
    }
}
