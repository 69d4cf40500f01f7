//! Demo driver error types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, CliError>;

/// Demo driver errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Cipher construction or evaluation failed
    #[error("cipher error: {0}")]
    Crypto(#[from] fpe_crypto::FpeError),

    /// Decryption did not recover the original value
    #[error("round-trip mismatch: {value} -enc-> {encrypted} -dec-> {decrypted}")]
    RoundTrip {
        value: u64,
        encrypted: u64,
        decrypted: u64,
    },

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Writing the tables failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
