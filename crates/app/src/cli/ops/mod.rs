pub mod keygen;
pub mod protect;
pub mod public_key;
pub mod verify;
pub mod version;

pub use keygen::Keygen;
pub use protect::Protect;
pub use public_key::PublicKey;
pub use verify::Verify;
pub use version::Version;

use std::path::Path;

use common::prelude::{AnyKey, KeyError, KeyKind};

/// The protection applied to, or checked on, a message body
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Shared-key authentication tag (header)
    Auth,
    /// Ed25519 signature (header)
    Sign,
    /// Anonymous sealed box (body replaced)
    Seal,
    /// Shared-key encryption (body replaced)
    Encrypt,
}

/// Read the textual key stored in a key file
pub(crate) async fn read_key_text(path: &Path) -> Result<String, KeyFileError> {
    let text = tokio::fs::read_to_string(path).await?;
    Ok(text.trim().to_string())
}

/// Read a key file holding a key of `kind`
pub(crate) async fn read_key(path: &Path, kind: KeyKind) -> Result<AnyKey, KeyFileError> {
    let text = read_key_text(path).await?;
    Ok(AnyKey::from_text(kind, &text)?)
}

#[derive(Debug, thiserror::Error)]
pub enum KeyFileError {
    #[error("failed to read key file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Key(#[from] KeyError),
}
