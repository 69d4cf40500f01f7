//! Cipher configuration

use crate::primitives::BlockCipherKind;
use serde::{Deserialize, Serialize};

/// Options for building a format-preserving cipher
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FpeConfig {
    /// Block cipher used inside the round function
    pub cipher: BlockCipherKind,
}

impl FpeConfig {
    /// Create a config using the given block cipher
    pub fn new(cipher: BlockCipherKind) -> Self {
        Self { cipher }
    }

    /// Set the block cipher
    pub fn with_cipher(mut self, cipher: BlockCipherKind) -> Self {
        self.cipher = cipher;
        self
    }
}
