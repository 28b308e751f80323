use std::path::PathBuf;

use clap::Args;

use common::prelude::KeyKind;

use super::{read_key, KeyFileError};

#[derive(Args, Debug, Clone)]
pub struct PublicKey {
    /// Kind of the secret key in the file (signing-secret or sealing-secret)
    pub kind: KeyKind,

    /// File holding the secret key
    pub key_file: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum PublicKeyError {
    #[error(transparent)]
    KeyFile(#[from] KeyFileError),
    #[error("{0} keys have no public half")]
    NoPublicKey(KeyKind),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for PublicKey {
    type Error = PublicKeyError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let key = read_key(&self.key_file, self.kind).await?;
        let public = key
            .public_key()
            .ok_or(PublicKeyError::NoPublicKey(self.kind))?;
        Ok(public.to_text())
    }
}
