use std::fmt;
use std::path::PathBuf;

use clap::Args;

use common::prelude::{AnyKey, KeyError, KeyKind};

#[derive(Args, Debug, Clone)]
pub struct Keygen {
    /// Kind of key to generate (shared-authentication, shared-encryption,
    /// signing-secret, sealing-secret)
    pub kind: KeyKind,

    /// Write the secret key to this file instead of printing it
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct KeygenOutput {
    key: AnyKey,
    written_to: Option<PathBuf>,
}

impl fmt::Display for KeygenOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.written_to {
            Some(path) => write!(f, "wrote {} key to {}", self.key.kind(), path.display())?,
            None => write!(f, "{}: {}", self.key.kind(), self.key.to_text())?,
        }
        if let Some(public) = self.key.public_key() {
            write!(f, "\n{}: {}", public.kind(), public.to_text())?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeygenError {
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error("failed to write key file: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Keygen {
    type Error = KeygenError;
    type Output = KeygenOutput;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let key = AnyKey::generate(self.kind)?;
        tracing::info!(kind = %self.kind, "generated key");

        if let Some(path) = &self.output {
            tokio::fs::write(path, format!("{}\n", key.to_text())).await?;
        }

        Ok(KeygenOutput {
            key,
            written_to: self.output.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::op::{Op, OpContext};
    use crate::state::AppConfig;

    #[tokio::test]
    async fn test_keygen_prints_keypair() {
        let ctx = OpContext::from_config(AppConfig::default());
        let op = Keygen {
            kind: KeyKind::SigningSecret,
            output: None,
        };

        let printed = op.execute(&ctx).await.unwrap().to_string();
        let lines: Vec<_> = printed.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("signing-secret: "));
        assert!(lines[1].starts_with("signing-public: "));
    }

    #[tokio::test]
    async fn test_keygen_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.key");
        let ctx = OpContext::from_config(AppConfig::default());
        let op = Keygen {
            kind: KeyKind::SharedAuthentication,
            output: Some(path.clone()),
        };

        let printed = op.execute(&ctx).await.unwrap().to_string();
        assert!(printed.starts_with("wrote shared-authentication key"));

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(AnyKey::from_text(KeyKind::SharedAuthentication, text.trim()).is_ok());
    }

    #[tokio::test]
    async fn test_public_kinds_are_refused() {
        let ctx = OpContext::from_config(AppConfig::default());
        let op = Keygen {
            kind: KeyKind::SealingPublic,
            output: None,
        };
        assert!(matches!(
            op.execute(&ctx).await,
            Err(KeygenError::Key(KeyError::NotGeneratable(KeyKind::SealingPublic)))
        ));
    }
}
