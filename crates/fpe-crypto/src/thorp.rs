//! Thorp-shuffle round function
//!
//! Each round maps a `source` value and a round index to a single
//! pseudorandom bit:
//!
//! ```text
//! mask   = AES(round_key,  le(round))
//! target = AES(source_key, le(source) ^ mask)
//! bit    = target[0] & 1
//! ```
//!
//! `source_key` and `round_key` are HMAC-SHA-256 digests of the master key
//! over two distinct labels, so neither AES instance ever sees the other's key.

use crate::{
    bits::BitPartition,
    config::FpeConfig,
    feistel::RoundFunction,
    primitives::{block_to_u64, derive_subkey, u64_to_block, xor_in_place, BlockCipherKind, RoundCipher},
    Result,
};
use zeroize::Zeroizing;

/// Label for the sub-key that mixes the source value
pub const SOURCE_KEY_LABEL: &[u8] = b"for key";

/// Label for the sub-key that masks by round index
pub const ROUND_KEY_LABEL: &[u8] = b"for round";

/// Keyed pseudorandom bit oracle over `(source, round)`
#[derive(Clone, Debug)]
pub struct ThorpShuffle {
    domain_size: u64,
    partition: BitPartition,
    source_cipher: RoundCipher,
    round_cipher: RoundCipher,
}

impl ThorpShuffle {
    /// Create a round function over `[0, domain_size)` with the default AES-128 cipher
    pub fn new(domain_size: u64, raw_key: impl AsRef<[u8]>) -> Result<Self> {
        Self::with_config(domain_size, raw_key, &FpeConfig::default())
    }

    /// Create a round function with explicit configuration
    pub fn with_config(domain_size: u64, raw_key: impl AsRef<[u8]>, config: &FpeConfig) -> Result<Self> {
        let partition = BitPartition::for_domain(domain_size)?;
        let raw_key = raw_key.as_ref();

        // Sub-keys are wiped as soon as the key schedules exist
        let source_key = derive_subkey(raw_key, SOURCE_KEY_LABEL)?;
        let source_cipher = RoundCipher::new(config.cipher, &source_key)?;
        drop(source_key);

        let round_key = derive_subkey(raw_key, ROUND_KEY_LABEL)?;
        let round_cipher = RoundCipher::new(config.cipher, &round_key)?;
        drop(round_key);

        Ok(Self {
            domain_size,
            partition,
            source_cipher,
            round_cipher,
        })
    }

    pub fn domain_size(&self) -> u64 {
        self.domain_size
    }

    pub fn source_bits(&self) -> u32 {
        self.partition.source_bits()
    }

    pub fn target_bits(&self) -> u32 {
        self.partition.target_bits()
    }

    pub fn partition(&self) -> BitPartition {
        self.partition
    }

    pub fn cipher(&self) -> BlockCipherKind {
        self.source_cipher.kind()
    }

    /// Pseudorandom bit for `source` at `round`
    pub fn bit(&self, source: u64, round: u32) -> u64 {
        let mut mask = Zeroizing::new(u64_to_block(u64::from(round)));
        self.round_cipher.encrypt_block(&mut mask);

        let mut block = Zeroizing::new(u64_to_block(source));
        xor_in_place(&mut block, &mask);
        self.source_cipher.encrypt_block(&mut block);

        block_to_u64(&block) & 1
    }
}

impl RoundFunction for ThorpShuffle {
    fn f(&self, source: u64, round: u32) -> u64 {
        self.bit(source, round)
    }

    fn domain_size(&self) -> u64 {
        self.domain_size
    }

    fn source_bits(&self) -> u32 {
        self.partition.source_bits()
    }

    fn target_bits(&self) -> u32 {
        self.partition.target_bits()
    }
}
