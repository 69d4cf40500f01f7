//! Key material for the format-preserving cipher
//!
//! - `FpeKey`: the caller's master secret, arbitrary length
//! - `SubKey`: an HMAC-derived key feeding one AES instance of the round function
//!
//! Both wipe their bytes on drop.

use crate::{FpeError, Result};
use rand::rngs::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of a derived sub-key in bytes (one HMAC-SHA-256 digest)
pub const SUBKEY_SIZE: usize = 32;

/// Size of a generated master key in bytes
pub const GENERATED_KEY_SIZE: usize = 32;

/// A master key from which the round-function sub-keys are derived
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct FpeKey {
    bytes: Vec<u8>,
}

impl FpeKey {
    /// Generate a new random master key
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; GENERATED_KEY_SIZE];
        rand::RngCore::fill_bytes(&mut OsRng, &mut bytes);
        Self { bytes }
    }

    /// Create a master key from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(FpeError::InvalidKey("master key must not be empty".to_string()));
        }
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Decode from hex
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut bytes = hex::decode(s.trim())?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    /// Decode from base64
    pub fn from_base64(s: &str) -> Result<Self> {
        use base64::Engine;
        let mut bytes = base64::engine::general_purpose::STANDARD.decode(s.trim())?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for FpeKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for FpeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FpeKey(<{} bytes redacted>)", self.bytes.len())
    }
}

/// A derived sub-key, truncated to the block cipher key size when used
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SubKey {
    bytes: [u8; SUBKEY_SIZE],
}

impl SubKey {
    pub(crate) fn new(bytes: [u8; SUBKEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; SUBKEY_SIZE] {
        &self.bytes
    }

    /// The first `len` bytes, as consumed by a block cipher of that key size
    pub fn prefix(&self, len: usize) -> &[u8] {
        &self.bytes[..len.min(SUBKEY_SIZE)]
    }
}

impl std::fmt::Debug for SubKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SubKey(<redacted>)")
    }
}
