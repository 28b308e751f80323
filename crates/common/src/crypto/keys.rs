use std::fmt;
use std::str::FromStr;

use ed25519_dalek::{SigningKey, VerifyingKey};
use subtle::ConstantTimeEq;
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::provider::{CryptoProvider, DefaultProvider, ProviderError};
use crate::codec::{self, CodecError};

/// Size of a shared HMAC-SHA-512-256 authentication key in bytes
pub const SHARED_AUTHENTICATION_KEY_SIZE: usize = 32;
/// Size of a shared XChaCha20-Poly1305 encryption key in bytes
pub const SHARED_ENCRYPTION_KEY_SIZE: usize = 32;
/// Size of an Ed25519 seed in bytes
pub const SIGNING_SEED_SIZE: usize = 32;
/// Size of an Ed25519 secret key (`seed || public`) in bytes
pub const SIGNING_SECRET_KEY_SIZE: usize = 64;
/// Size of an Ed25519 public key in bytes
pub const SIGNING_PUBLIC_KEY_SIZE: usize = 32;
/// Size of an X25519 secret key in bytes
pub const SEALING_SECRET_KEY_SIZE: usize = 32;
/// Size of an X25519 public key in bytes
pub const SEALING_PUBLIC_KEY_SIZE: usize = 32;

const REDACTED: &str = "****";
const REDACTED_HINT: &str = "use as_bytes() or to_text(), do not print keys";

/// Errors that can occur while constructing or generating keys
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("invalid {kind} length, expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        kind: KeyKind,
        expected: usize,
        actual: usize,
    },
    #[error("invalid {kind} encoding: {source}")]
    InvalidEncoding {
        kind: KeyKind,
        #[source]
        source: CodecError,
    },
    #[error("{0} keys cannot be generated, derive them from a secret key")]
    NotGeneratable(KeyKind),
    #[error("unknown key kind: {0}")]
    UnknownKind(String),
    #[error("key generation failed: {0}")]
    Generation(#[from] ProviderError),
}

/// The closed set of key kinds understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    SharedAuthentication,
    SharedEncryption,
    SigningSecret,
    SigningPublic,
    SealingSecret,
    SealingPublic,
}

impl KeyKind {
    /// All key kinds, in declaration order
    pub const ALL: [KeyKind; 6] = [
        KeyKind::SharedAuthentication,
        KeyKind::SharedEncryption,
        KeyKind::SigningSecret,
        KeyKind::SigningPublic,
        KeyKind::SealingSecret,
        KeyKind::SealingPublic,
    ];

    /// The exact byte length a key of this kind must have
    pub const fn size(&self) -> usize {
        match self {
            KeyKind::SharedAuthentication => SHARED_AUTHENTICATION_KEY_SIZE,
            KeyKind::SharedEncryption => SHARED_ENCRYPTION_KEY_SIZE,
            KeyKind::SigningSecret => SIGNING_SECRET_KEY_SIZE,
            KeyKind::SigningPublic => SIGNING_PUBLIC_KEY_SIZE,
            KeyKind::SealingSecret => SEALING_SECRET_KEY_SIZE,
            KeyKind::SealingPublic => SEALING_PUBLIC_KEY_SIZE,
        }
    }

    /// Whether keys of this kind can be drawn from a random source
    pub const fn is_generatable(&self) -> bool {
        !matches!(self, KeyKind::SigningPublic | KeyKind::SealingPublic)
    }

    /// The public counterpart of a secret key kind, if it has one
    pub const fn public_kind(&self) -> Option<KeyKind> {
        match self {
            KeyKind::SigningSecret => Some(KeyKind::SigningPublic),
            KeyKind::SealingSecret => Some(KeyKind::SealingPublic),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            KeyKind::SharedAuthentication => "shared-authentication",
            KeyKind::SharedEncryption => "shared-encryption",
            KeyKind::SigningSecret => "signing-secret",
            KeyKind::SigningPublic => "signing-public",
            KeyKind::SealingSecret => "sealing-secret",
            KeyKind::SealingPublic => "sealing-public",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyKind {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| KeyError::UnknownKind(s.to_string()))
    }
}

/// Common surface of every key kind
///
/// Raw bytes are only reachable through [`CryptographyKey::as_bytes`];
/// `Debug` output of every key is redacted.
pub trait CryptographyKey {
    /// The kind of this key
    const KIND: KeyKind;

    /// Raw key bytes
    fn as_bytes(&self) -> &[u8];

    /// Base64url (unpadded) text form of the key
    fn to_text(&self) -> String {
        codec::encode(self.as_bytes())
    }
}

fn check_length(kind: KeyKind, bytes: &[u8]) -> Result<(), KeyError> {
    if bytes.len() != kind.size() {
        return Err(KeyError::InvalidKeyLength {
            kind,
            expected: kind.size(),
            actual: bytes.len(),
        });
    }
    Ok(())
}

macro_rules! fixed_key {
    ($(#[$meta:meta])* $name:ident, $kind:expr, $size:expr) => {
        $(#[$meta])*
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct $name([u8; $size]);

        impl $name {
            /// Construct the key from raw bytes, which must be exactly the key size
            pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
                check_length($kind, bytes)?;
                let mut buff = [0; $size];
                buff.copy_from_slice(bytes);
                Ok(Self(buff))
            }

            /// Parse the key from its base64url (unpadded) text form
            pub fn from_text(text: &str) -> Result<Self, KeyError> {
                let mut bytes = codec::decode(text.trim()).map_err(|source| {
                    KeyError::InvalidEncoding {
                        kind: $kind,
                        source,
                    }
                })?;
                let key = Self::from_bytes(&bytes);
                bytes.zeroize();
                key
            }
        }

        impl CryptographyKey for $name {
            const KIND: KeyKind = $kind;

            fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $size]> for $name {
            fn from(bytes: [u8; $size]) -> Self {
                Self(bytes)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = KeyError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                Self::from_bytes(bytes)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.0.ct_eq(&other.0).into()
            }
        }

        impl Eq for $name {}

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("key", &REDACTED)
                    .field("hint", &REDACTED_HINT)
                    .finish()
            }
        }
    };
}

fixed_key!(
    /// Shared secret for symmetric message authentication (HMAC-SHA-512-256)
    SharedAuthenticationKey,
    KeyKind::SharedAuthentication,
    SHARED_AUTHENTICATION_KEY_SIZE
);

fixed_key!(
    /// Shared secret for symmetric authenticated encryption (XChaCha20-Poly1305)
    SharedEncryptionKey,
    KeyKind::SharedEncryption,
    SHARED_ENCRYPTION_KEY_SIZE
);

fixed_key!(
    /// Ed25519 secret key in the `seed (32) || public key (32)` layout
    ///
    /// Only the seed is used for signing and for deriving the public key,
    /// so the derived [`SigningPublicKey`] is stable for a given seed.
    SigningSecretKey,
    KeyKind::SigningSecret,
    SIGNING_SECRET_KEY_SIZE
);

fixed_key!(
    /// Ed25519 public key used to verify detached body signatures
    SigningPublicKey,
    KeyKind::SigningPublic,
    SIGNING_PUBLIC_KEY_SIZE
);

fixed_key!(
    /// X25519 secret key of a sealed-message recipient
    SealingSecretKey,
    KeyKind::SealingSecret,
    SEALING_SECRET_KEY_SIZE
);

fixed_key!(
    /// X25519 public key that messages are sealed to
    SealingPublicKey,
    KeyKind::SealingPublic,
    SEALING_PUBLIC_KEY_SIZE
);

impl SharedAuthenticationKey {
    /// Generate a new random key using a cryptographically secure RNG
    pub fn generate() -> Self {
        Self::generate_with(&DefaultProvider).expect("failed to generate random bytes")
    }

    /// Generate a new random key from the provider's random source
    pub fn generate_with<P: CryptoProvider + ?Sized>(provider: &P) -> Result<Self, KeyError> {
        let mut buff = [0; SHARED_AUTHENTICATION_KEY_SIZE];
        provider.fill_random(&mut buff)?;
        Ok(Self(buff))
    }
}

impl SharedEncryptionKey {
    /// Generate a new random key using a cryptographically secure RNG
    pub fn generate() -> Self {
        Self::generate_with(&DefaultProvider).expect("failed to generate random bytes")
    }

    /// Generate a new random key from the provider's random source
    pub fn generate_with<P: CryptoProvider + ?Sized>(provider: &P) -> Result<Self, KeyError> {
        let mut buff = [0; SHARED_ENCRYPTION_KEY_SIZE];
        provider.fill_random(&mut buff)?;
        Ok(Self(buff))
    }
}

impl SigningSecretKey {
    /// Generate a new random keypair and return its secret half
    pub fn generate() -> Self {
        Self::generate_with(&DefaultProvider).expect("failed to generate random bytes")
    }

    /// Generate a new random keypair from the provider's random source
    pub fn generate_with<P: CryptoProvider + ?Sized>(provider: &P) -> Result<Self, KeyError> {
        let mut seed = [0; SIGNING_SEED_SIZE];
        provider.fill_random(&mut seed)?;
        let key = Self::from_seed(&seed);
        seed.zeroize();
        Ok(key)
    }

    /// Expand a 32 byte Ed25519 seed into a full secret key
    pub fn from_seed(seed: &[u8; SIGNING_SEED_SIZE]) -> Self {
        Self(SigningKey::from_bytes(seed).to_keypair_bytes())
    }

    /// Derive the matching public key
    pub fn public_key(&self) -> SigningPublicKey {
        SigningPublicKey(self.signing_key().verifying_key().to_bytes())
    }

    pub(crate) fn signing_key(&self) -> SigningKey {
        let mut seed = [0; SIGNING_SEED_SIZE];
        seed.copy_from_slice(&self.0[..SIGNING_SEED_SIZE]);
        let key = SigningKey::from_bytes(&seed);
        seed.zeroize();
        key
    }
}

impl SigningPublicKey {
    /// Decompress into a dalek verifying key, `None` if the bytes are not a curve point
    pub(crate) fn verifying_key(&self) -> Option<VerifyingKey> {
        VerifyingKey::from_bytes(&self.0).ok()
    }
}

impl SealingSecretKey {
    /// Generate a new random keypair and return its secret half
    pub fn generate() -> Self {
        Self::generate_with(&DefaultProvider).expect("failed to generate random bytes")
    }

    /// Generate a new random keypair from the provider's random source
    pub fn generate_with<P: CryptoProvider + ?Sized>(provider: &P) -> Result<Self, KeyError> {
        let mut buff = [0; SEALING_SECRET_KEY_SIZE];
        provider.fill_random(&mut buff)?;
        Ok(Self(buff))
    }

    /// Derive the matching public key
    pub fn public_key(&self) -> SealingPublicKey {
        SealingPublicKey(X25519PublicKey::from(&self.static_secret()).to_bytes())
    }

    pub(crate) fn static_secret(&self) -> StaticSecret {
        StaticSecret::from(self.0)
    }
}

impl SealingPublicKey {
    pub(crate) fn x25519(&self) -> X25519PublicKey {
        X25519PublicKey::from(self.0)
    }
}

/// A key of any kind, tagged with its kind
///
/// Used where the kind is only known at runtime, e.g. when loading keys
/// named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyKey {
    SharedAuthentication(SharedAuthenticationKey),
    SharedEncryption(SharedEncryptionKey),
    SigningSecret(SigningSecretKey),
    SigningPublic(SigningPublicKey),
    SealingSecret(SealingSecretKey),
    SealingPublic(SealingPublicKey),
}

impl AnyKey {
    /// Construct a key of the given kind from raw bytes
    pub fn from_bytes(kind: KeyKind, bytes: &[u8]) -> Result<Self, KeyError> {
        Ok(match kind {
            KeyKind::SharedAuthentication => {
                Self::SharedAuthentication(SharedAuthenticationKey::from_bytes(bytes)?)
            }
            KeyKind::SharedEncryption => {
                Self::SharedEncryption(SharedEncryptionKey::from_bytes(bytes)?)
            }
            KeyKind::SigningSecret => Self::SigningSecret(SigningSecretKey::from_bytes(bytes)?),
            KeyKind::SigningPublic => Self::SigningPublic(SigningPublicKey::from_bytes(bytes)?),
            KeyKind::SealingSecret => Self::SealingSecret(SealingSecretKey::from_bytes(bytes)?),
            KeyKind::SealingPublic => Self::SealingPublic(SealingPublicKey::from_bytes(bytes)?),
        })
    }

    /// Parse a key of the given kind from its text form
    pub fn from_text(kind: KeyKind, text: &str) -> Result<Self, KeyError> {
        let mut bytes = codec::decode(text.trim())
            .map_err(|source| KeyError::InvalidEncoding { kind, source })?;
        let key = Self::from_bytes(kind, &bytes);
        bytes.zeroize();
        key
    }

    /// Generate a fresh key of the given kind
    pub fn generate(kind: KeyKind) -> Result<Self, KeyError> {
        Ok(match kind {
            KeyKind::SharedAuthentication => {
                Self::SharedAuthentication(SharedAuthenticationKey::generate())
            }
            KeyKind::SharedEncryption => Self::SharedEncryption(SharedEncryptionKey::generate()),
            KeyKind::SigningSecret => Self::SigningSecret(SigningSecretKey::generate()),
            KeyKind::SealingSecret => Self::SealingSecret(SealingSecretKey::generate()),
            KeyKind::SigningPublic | KeyKind::SealingPublic => {
                return Err(KeyError::NotGeneratable(kind))
            }
        })
    }

    pub fn kind(&self) -> KeyKind {
        match self {
            Self::SharedAuthentication(_) => KeyKind::SharedAuthentication,
            Self::SharedEncryption(_) => KeyKind::SharedEncryption,
            Self::SigningSecret(_) => KeyKind::SigningSecret,
            Self::SigningPublic(_) => KeyKind::SigningPublic,
            Self::SealingSecret(_) => KeyKind::SealingSecret,
            Self::SealingPublic(_) => KeyKind::SealingPublic,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::SharedAuthentication(key) => key.as_bytes(),
            Self::SharedEncryption(key) => key.as_bytes(),
            Self::SigningSecret(key) => key.as_bytes(),
            Self::SigningPublic(key) => key.as_bytes(),
            Self::SealingSecret(key) => key.as_bytes(),
            Self::SealingPublic(key) => key.as_bytes(),
        }
    }

    pub fn to_text(&self) -> String {
        codec::encode(self.as_bytes())
    }

    /// Derive the public key, for secret halves of keypairs only
    pub fn public_key(&self) -> Option<AnyKey> {
        match self {
            Self::SigningSecret(key) => Some(Self::SigningPublic(key.public_key())),
            Self::SealingSecret(key) => Some(Self::SealingPublic(key.public_key())),
            _ => None,
        }
    }
}
