use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use clap::Args;
use http::Request;

use common::prelude::{
    HttpMessage, ProtectError, SealingPublicKey, SharedAuthenticationKey, SharedEncryptionKey,
    SigningSecretKey, AUTHENTICATION_HEADER, SIGNATURE_HEADER,
};

use super::{read_key_text, KeyFileError, Mode};

/// Apply a protection to the body in a file
#[derive(Args, Debug, Clone)]
pub struct Protect {
    #[arg(value_enum)]
    pub mode: Mode,

    /// Key file: the shared key for auth and encrypt, the signing secret key
    /// for sign, the recipient's sealing public key for seal
    #[arg(long)]
    pub key: PathBuf,

    /// Body to protect
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the protected body
    #[arg(long)]
    pub output: PathBuf,
}

#[derive(Debug)]
pub struct ProtectOutput {
    /// Header line to send with the body, for header-based protections
    header: Option<(&'static str, String)>,
    body_len: usize,
    output: PathBuf,
}

impl fmt::Display for ProtectOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.header {
            Some((name, value)) => write!(f, "{}: {}", name, value),
            None => write!(
                f,
                "wrote {} byte body to {}",
                self.body_len,
                self.output.display()
            ),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProtectOpError {
    #[error(transparent)]
    KeyFile(#[from] KeyFileError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Protect(#[from] ProtectError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Protect {
    type Error = ProtectOpError;
    type Output = ProtectOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let text = read_key_text(&self.key).await?;
        let body = tokio::fs::read(&self.input).await?;
        let request = Request::new(Bytes::from(body));

        let engine = &ctx.engine;
        let (protected, header_name) = match self.mode {
            Mode::Auth => {
                let key = SharedAuthenticationKey::from_text(&text).map_err(KeyFileError::from)?;
                (engine.authenticate(request, &key)?, Some(AUTHENTICATION_HEADER))
            }
            Mode::Sign => {
                let key = SigningSecretKey::from_text(&text).map_err(KeyFileError::from)?;
                (engine.sign(request, &key)?, Some(SIGNATURE_HEADER))
            }
            Mode::Seal => {
                let key = SealingPublicKey::from_text(&text).map_err(KeyFileError::from)?;
                (engine.seal(request, &key)?, None)
            }
            Mode::Encrypt => {
                let key = SharedEncryptionKey::from_text(&text).map_err(KeyFileError::from)?;
                (engine.encrypt(request, &key)?, None)
            }
        };

        tokio::fs::write(&self.output, protected.body_bytes()).await?;
        tracing::info!(
            mode = ?self.mode,
            body_len = protected.body_bytes().len(),
            "protected body"
        );

        let header = header_name.map(|name| {
            let value = protected
                .header_values(name)
                .first()
                .map(|value| String::from_utf8_lossy(value).into_owned())
                .unwrap_or_default();
            (name, value)
        });

        Ok(ProtectOutput {
            header,
            body_len: protected.body_bytes().len(),
            output: self.output.clone(),
        })
    }
}
