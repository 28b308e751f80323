use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use clap::Args;
use http::header::{HeaderName, HeaderValue};
use http::Request;

use common::prelude::{
    HttpMessage, ProtectError, SealingSecretKey, SharedAuthenticationKey, SharedEncryptionKey,
    SigningPublicKey, AUTHENTICATION_HEADER, SIGNATURE_HEADER,
};

use super::{read_key_text, KeyFileError, Mode};

/// Check or remove a protection from the body in a file
#[derive(Args, Debug, Clone)]
pub struct Verify {
    #[arg(value_enum)]
    pub mode: Mode,

    /// Key file: the shared key for auth and encrypt, the signer's public
    /// key for sign, the sealing secret key for seal
    #[arg(long)]
    pub key: PathBuf,

    /// Protected body
    #[arg(long)]
    pub input: PathBuf,

    /// Protection header value received with the body; repeat for multiple values
    #[arg(long = "header")]
    pub headers: Vec<String>,

    /// Where to write the verified or recovered body
    #[arg(long)]
    pub output: PathBuf,
}

impl Verify {
    fn header_name(&self) -> Option<&'static str> {
        match self.mode {
            Mode::Auth => Some(AUTHENTICATION_HEADER),
            Mode::Sign => Some(SIGNATURE_HEADER),
            Mode::Seal | Mode::Encrypt => None,
        }
    }
}

#[derive(Debug)]
pub struct VerifyOutput {
    mode: Mode,
    body_len: usize,
    output: PathBuf,
}

impl fmt::Display for VerifyOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.mode {
            Mode::Auth | Mode::Sign => "verified",
            Mode::Seal | Mode::Encrypt => "opened",
        };
        write!(
            f,
            "{} {} byte body, wrote {}",
            action,
            self.body_len,
            self.output.display()
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyOpError {
    #[error(transparent)]
    KeyFile(#[from] KeyFileError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Verify(#[from] ProtectError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Verify {
    type Error = VerifyOpError;
    type Output = VerifyOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let text = read_key_text(&self.key).await?;
        let body = tokio::fs::read(&self.input).await?;
        let mut request = Request::new(Bytes::from(body));

        match self.header_name() {
            Some(name) => {
                for value in &self.headers {
                    let value = HeaderValue::from_str(value).map_err(ProtectError::from)?;
                    request
                        .headers_mut()
                        .append(HeaderName::from_static(name), value);
                }
            }
            None if !self.headers.is_empty() => {
                tracing::warn!(mode = ?self.mode, "ignoring --header, body carries its own protection");
            }
            None => {}
        }

        let engine = &ctx.engine;
        let verified = match self.mode {
            Mode::Auth => {
                let key = SharedAuthenticationKey::from_text(&text).map_err(KeyFileError::from)?;
                engine.verify_authenticated(request, &key)?
            }
            Mode::Sign => {
                let key = SigningPublicKey::from_text(&text).map_err(KeyFileError::from)?;
                engine.verify_signed(request, &key)?
            }
            Mode::Seal => {
                let key = SealingSecretKey::from_text(&text).map_err(KeyFileError::from)?;
                engine.unseal(request, &key)?
            }
            Mode::Encrypt => {
                let key = SharedEncryptionKey::from_text(&text).map_err(KeyFileError::from)?;
                engine.decrypt(request, &key)?
            }
        };

        tokio::fs::write(&self.output, verified.body_bytes()).await?;

        Ok(VerifyOutput {
            mode: self.mode,
            body_len: verified.body_bytes().len(),
            output: self.output.clone(),
        })
    }
}
