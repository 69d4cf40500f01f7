//! Bit-width helpers and the source/target split of a domain
//!
//! A domain of size N is embedded in the smallest power-of-two superset
//! `[0, 2^domain_bits)`. Every value of that superset is viewed as a
//! one-bit `target` on top of a `source_bits`-wide `source`.

use crate::{FpeError, Result};

/// Width of the target half. The Thorp shuffle moves exactly one bit per round.
pub const TARGET_BITS: u32 = 1;

/// Widest superset the `u64` value representation can hold while keeping
/// `domain_size` itself representable.
pub const MAX_DOMAIN_BITS: u32 = 63;

/// Largest supported domain size (2^63)
pub const MAX_DOMAIN_SIZE: u64 = 1 << MAX_DOMAIN_BITS;

/// Floor of log2; `0` maps to `0`.
pub fn int_log2(value: u64) -> u32 {
    value.checked_ilog2().unwrap_or(0)
}

/// Round up to the next power of two, `None` when the result would overflow.
///
/// `0` rounds up to `1`.
pub fn up_to_pow2(value: u64) -> Option<u64> {
    value.checked_next_power_of_two()
}

/// Mask of the `bits` lowest bits.
pub fn low_mask(bits: u32) -> u64 {
    1u64.checked_shl(bits).map_or(u64::MAX, |bit| bit - 1)
}

/// Split of the power-of-two superset into source and target bits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitPartition {
    source_bits: u32,
    target_bits: u32,
}

impl BitPartition {
    /// Compute the minimal partition covering `[0, domain_size)`.
    ///
    /// A single-value domain still needs one bit so that the target half exists.
    pub fn for_domain(domain_size: u64) -> Result<Self> {
        if domain_size == 0 {
            return Err(FpeError::invalid_domain(
                domain_size,
                "domain must contain at least one value",
            ));
        }

        let superset = up_to_pow2(domain_size).ok_or_else(|| {
            FpeError::invalid_domain(
                domain_size,
                format!("domain exceeds the maximum of 2^{}", MAX_DOMAIN_BITS),
            )
        })?;

        let domain_bits = int_log2(superset).max(TARGET_BITS);
        if domain_bits > MAX_DOMAIN_BITS {
            return Err(FpeError::invalid_domain(
                domain_size,
                format!(
                    "domain needs {} bits, at most {} are supported",
                    domain_bits, MAX_DOMAIN_BITS
                ),
            ));
        }

        Ok(Self {
            source_bits: domain_bits - TARGET_BITS,
            target_bits: TARGET_BITS,
        })
    }

    /// Build a partition from explicit widths, validating that it covers `domain_size`.
    pub fn from_widths(domain_size: u64, source_bits: u32, target_bits: u32) -> Result<Self> {
        if target_bits != TARGET_BITS {
            return Err(FpeError::InvalidPartition(format!(
                "target must be exactly {} bit, got {}",
                TARGET_BITS, target_bits
            )));
        }

        let domain_bits = source_bits.saturating_add(target_bits);
        if domain_bits > MAX_DOMAIN_BITS {
            return Err(FpeError::InvalidPartition(format!(
                "{} bits exceed the maximum of {}",
                domain_bits, MAX_DOMAIN_BITS
            )));
        }
        if domain_size == 0 || domain_size > 1u64 << domain_bits {
            return Err(FpeError::InvalidPartition(format!(
                "{} bits do not cover a domain of {} values",
                domain_bits, domain_size
            )));
        }

        Ok(Self {
            source_bits,
            target_bits,
        })
    }

    pub fn source_bits(&self) -> u32 {
        self.source_bits
    }

    pub fn target_bits(&self) -> u32 {
        self.target_bits
    }

    /// Total width of the power-of-two superset
    pub fn domain_bits(&self) -> u32 {
        self.source_bits + self.target_bits
    }

    /// Size of the power-of-two superset the rounds permute
    pub fn superset_size(&self) -> u64 {
        1u64 << self.domain_bits()
    }
}
