use serde::{Deserialize, Serialize};

use crate::codec::BodyEncoding;

/// Engine configuration
///
/// Every field has a default, so an empty TOML table (or no file at all)
/// yields a working configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Layout of bodies replaced by seal and encrypt operations
    pub sealed_body_encoding: BodyEncoding,
}

impl EngineConfig {
    pub fn with_sealed_body_encoding(mut self, encoding: BodyEncoding) -> Self {
        self.sealed_body_encoding = encoding;
        self
    }
}
