//! # FPE Crypto
//!
//! Format-preserving encryption over dense integer domains.
//!
//! This crate provides:
//! - **Feistel cipher**: a keyed bijection over `[0, N)` for any `N` up to 2^63
//! - **Thorp shuffle**: a one-bit-per-round AES-based round function
//! - **Cycle-walking**: domains that are not powers of two stay closed under encryption
//! - **Key handling**: HMAC-SHA-256 sub-key derivation with zeroization on drop
//!
//! Ciphertexts carry no integrity tag. Anyone can submit any value of the
//! domain for decryption and will get another value of the domain back.
//!
//! ## Example
//!
//! ```rust
//! use fpe_crypto::FeistelCipher;
//!
//! let cipher = FeistelCipher::new(17, "secret key")?;
//!
//! let encrypted = cipher.encrypt(5)?;
//! assert!(encrypted < 17);
//! assert_eq!(cipher.decrypt(encrypted)?, 5);
//! # Ok::<(), fpe_crypto::FpeError>(())
//! ```

pub mod bits;
pub mod config;
pub mod error;
pub mod feistel;
pub mod keys;
pub mod primitives;
pub mod thorp;

pub use bits::{BitPartition, MAX_DOMAIN_BITS, MAX_DOMAIN_SIZE};
pub use config::FpeConfig;
pub use error::{FpeError, Result};
pub use feistel::{FeistelCipher, RoundFunction, ThorpFeistelCipher};
pub use keys::{FpeKey, SubKey};
pub use primitives::{BlockCipherKind, RoundCipher};
pub use thorp::ThorpShuffle;
