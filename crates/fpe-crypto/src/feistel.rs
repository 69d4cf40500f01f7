//! Small-domain Feistel cipher with cycle-walking
//!
//! A value of the power-of-two superset is laid out as `[target][source]`
//! with a one-bit target. Each forward round produces
//! `[source][target ^ f(source, round)]`, rotating the source up by one
//! bit. After `4 * domain_bits` rounds every bit has been rewritten four
//! times. Because the rounds permute the whole superset, re-applying them
//! to a value that fell outside `[0, domain_size)` eventually lands back
//! inside it (cycle-walking), and the result is a permutation of the domain.

use crate::{
    bits::{low_mask, BitPartition},
    config::FpeConfig,
    thorp::ThorpShuffle,
    FpeError, Result,
};
use tracing::{debug, trace};

/// Rounds per bit of the superset
pub const ROUNDS_PER_BIT: u32 = 4;

/// Largest domain `FeistelCipher::permutation` will materialize
pub const MAX_TABLE_SIZE: u64 = 1 << 20;

/// A keyed pseudorandom function usable as a Feistel round
pub trait RoundFunction {
    /// Bit (0 or 1) for the given source half and round index
    fn f(&self, source: u64, round: u32) -> u64;

    /// Size of the domain the function was built for
    fn domain_size(&self) -> u64;

    /// Width of the source half
    fn source_bits(&self) -> u32;

    /// Width of the target half
    fn target_bits(&self) -> u32;
}

/// Format-preserving bijection over `[0, domain_size)`
#[derive(Clone, Debug)]
pub struct FeistelCipher<F = ThorpShuffle> {
    round_function: F,
    domain_size: u64,
    source_bits: u32,
    target_bits: u32,
    domain_bits: u32,
}

/// The Feistel cipher driven by the Thorp-shuffle round function
pub type ThorpFeistelCipher = FeistelCipher<ThorpShuffle>;

impl FeistelCipher<ThorpShuffle> {
    /// Create a cipher over `[0, domain_size)` keyed by `raw_key`
    pub fn new(domain_size: u64, raw_key: impl AsRef<[u8]>) -> Result<Self> {
        Self::with_config(domain_size, raw_key, &FpeConfig::default())
    }

    /// Create a cipher with explicit configuration
    pub fn with_config(domain_size: u64, raw_key: impl AsRef<[u8]>, config: &FpeConfig) -> Result<Self> {
        let cipher = Self::with_round_function(ThorpShuffle::with_config(domain_size, raw_key, config)?)?;
        debug!(
            domain_size,
            source_bits = cipher.source_bits,
            domain_bits = cipher.domain_bits,
            cipher = %config.cipher,
            "thorp feistel cipher ready"
        );
        Ok(cipher)
    }
}

impl<F: RoundFunction> FeistelCipher<F> {
    /// Wrap an arbitrary round function
    ///
    /// The round function must expose a one-bit target and a partition
    /// whose superset covers its domain.
    pub fn with_round_function(round_function: F) -> Result<Self> {
        let domain_size = round_function.domain_size();
        let partition = BitPartition::from_widths(
            domain_size,
            round_function.source_bits(),
            round_function.target_bits(),
        )?;

        Ok(Self {
            round_function,
            domain_size,
            source_bits: partition.source_bits(),
            target_bits: partition.target_bits(),
            domain_bits: partition.domain_bits(),
        })
    }

    pub fn domain_size(&self) -> u64 {
        self.domain_size
    }

    pub fn source_bits(&self) -> u32 {
        self.source_bits
    }

    pub fn target_bits(&self) -> u32 {
        self.target_bits
    }

    pub fn domain_bits(&self) -> u32 {
        self.domain_bits
    }

    /// Rounds applied per pass over the superset
    pub fn round_count(&self) -> u32 {
        self.domain_bits * ROUNDS_PER_BIT
    }

    pub fn round_function(&self) -> &F {
        &self.round_function
    }

    /// Encrypt a value of the domain
    pub fn encrypt(&self, value: u64) -> Result<u64> {
        self.check_domain(value)?;

        let mut value = value;
        let mut passes = 0u32;
        loop {
            for round in 0..self.round_count() {
                value = self.forward_round(value, round);
            }
            passes += 1;
            if value < self.domain_size {
                break;
            }
        }

        trace!(passes, "encrypt cycle-walk finished");
        Ok(value)
    }

    /// Decrypt a value of the domain
    pub fn decrypt(&self, value: u64) -> Result<u64> {
        self.check_domain(value)?;

        let mut value = value;
        let mut passes = 0u32;
        loop {
            for round in (0..self.round_count()).rev() {
                value = self.backward_round(value, round);
            }
            passes += 1;
            if value < self.domain_size {
                break;
            }
        }

        trace!(passes, "decrypt cycle-walk finished");
        Ok(value)
    }

    /// Encrypt every value, failing on the first one outside the domain
    pub fn encrypt_all(&self, values: &[u64]) -> Result<Vec<u64>> {
        values.iter().map(|&value| self.encrypt(value)).collect()
    }

    /// Decrypt every value, failing on the first one outside the domain
    pub fn decrypt_all(&self, values: &[u64]) -> Result<Vec<u64>> {
        values.iter().map(|&value| self.decrypt(value)).collect()
    }

    /// Full encryption table: entry `i` holds `encrypt(i)`
    pub fn permutation(&self) -> Result<Vec<u64>> {
        if self.domain_size > MAX_TABLE_SIZE {
            return Err(FpeError::invalid_domain(
                self.domain_size,
                format!("permutation tables are limited to {} entries", MAX_TABLE_SIZE),
            ));
        }
        (0..self.domain_size).map(|value| self.encrypt(value)).collect()
    }

    fn check_domain(&self, value: u64) -> Result<()> {
        if value >= self.domain_size {
            return Err(FpeError::OutOfDomain {
                value,
                domain_size: self.domain_size,
            });
        }
        Ok(())
    }

    /// `[target][source]` -> `[source][target ^ f(source)]`
    fn forward_round(&self, value: u64, round: u32) -> u64 {
        let source = value & low_mask(self.source_bits);
        let target = (value >> self.source_bits) ^ self.round_function.f(source, round);
        (source << self.target_bits) | target
    }

    /// `[source][target]` -> `[target ^ f(source)][source]`
    fn backward_round(&self, value: u64, round: u32) -> u64 {
        let source = value >> self.target_bits;
        let target = (value & low_mask(self.target_bits)) ^ self.round_function.f(source, round);
        source | (target << self.source_bits)
    }
}
