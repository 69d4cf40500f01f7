//! Error types for the fpe-crypto crate

use thiserror::Error;

/// Result type alias using `FpeError`
pub type Result<T> = std::result::Result<T, FpeError>;

/// Errors that can occur while building or using a format-preserving cipher
#[derive(Error, Debug)]
pub enum FpeError {
    /// Domain size cannot be represented by the cipher
    #[error("invalid domain size {domain_size}: {reason}")]
    InvalidDomain { domain_size: u64, reason: String },

    /// Input value does not belong to [0, domain_size)
    #[error("value {value} is out of domain [0, {domain_size})")]
    OutOfDomain { value: u64, domain_size: u64 },

    /// Round function bit widths do not fit the Feistel construction
    #[error("invalid bit partition: {0}")]
    InvalidPartition(String),

    /// Underlying MAC or block cipher refused to initialize
    #[error("primitive failure: {0}")]
    Primitive(String),

    /// Invalid key format or length
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Unrecognized block cipher name
    #[error("unknown block cipher: {0}")]
    UnknownCipher(String),

    /// Base64 decode error
    #[error("base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// Hex decode error
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),
}

impl FpeError {
    /// Check if this error concerns the domain (bad domain size or bad input value)
    pub fn is_domain_error(&self) -> bool {
        matches!(self, Self::InvalidDomain { .. } | Self::OutOfDomain { .. })
    }

    /// Check if this error came from a cryptographic primitive
    pub fn is_primitive_error(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    pub(crate) fn invalid_domain(domain_size: u64, reason: impl Into<String>) -> Self {
        Self::InvalidDomain {
            domain_size,
            reason: reason.into(),
        }
    }
}
