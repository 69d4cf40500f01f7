//! Demo driver configuration

use crate::error::{CliError, Result};
use fpe_crypto::{BlockCipherKind, FpeConfig, FpeKey};
use serde::{Deserialize, Serialize};

/// Where the master key comes from
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "encoding", content = "value", rename_all = "lowercase")]
pub enum KeySource {
    /// UTF-8 text used verbatim
    Text(String),
    /// Hex-encoded bytes
    Hex(String),
    /// Base64-encoded bytes
    Base64(String),
}

impl KeySource {
    /// Decode into key material
    pub fn resolve(&self) -> Result<FpeKey> {
        let key = match self {
            Self::Text(text) => FpeKey::from_bytes(text.as_bytes()),
            Self::Hex(encoded) => FpeKey::from_hex(encoded),
            Self::Base64(encoded) => FpeKey::from_base64(encoded),
        };
        Ok(key?)
    }

    fn encoding(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Hex(_) => "hex",
            Self::Base64(_) => "base64",
        }
    }
}

impl std::fmt::Debug for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeySource({}, <redacted>)", self.encoding())
    }
}

/// Demo driver configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CliConfig {
    /// Number of values in the domain
    pub domain_size: u64,
    /// Master key
    pub key: KeySource,
    /// Block cipher used by the round function
    pub cipher: BlockCipherKind,
    /// Maximum number of table rows to print
    pub limit: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            domain_size: 17,
            key: KeySource::Text("secret key".to_string()),
            cipher: BlockCipherKind::Aes128,
            limit: 64,
        }
    }
}

impl CliConfig {
    /// Cipher options derived from this configuration
    pub fn fpe_config(&self) -> FpeConfig {
        FpeConfig::new(self.cipher)
    }

    /// Number of rows the tables will contain
    pub fn rows(&self) -> u64 {
        self.domain_size.min(self.limit)
    }

    /// Reject settings that cannot produce a table
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(CliError::Config("row limit must be at least 1".to_string()));
        }
        Ok(())
    }
}
