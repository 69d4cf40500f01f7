//! Cryptographic building blocks used by the round function
//!
//! This module wraps HMAC-SHA-256 (sub-key derivation) and AES (the
//! non-linear step of each round) behind small, fixed-size interfaces.
//! AES is only ever keyed for encryption.

use crate::{
    keys::{SubKey, SUBKEY_SIZE},
    FpeError, Result,
};
use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::{fmt, str::FromStr};
use zeroize::Zeroize;

type HmacSha256 = Hmac<Sha256>;

/// Size of an AES block in bytes
pub const BLOCK_SIZE: usize = 16;

/// A single cipher block
pub type Block = [u8; BLOCK_SIZE];

/// Encode an integer as little-endian bytes into a zero-padded block
pub fn u64_to_block(value: u64) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block[..8].copy_from_slice(&value.to_le_bytes());
    block
}

/// Read the low eight bytes of a block as a little-endian integer
pub fn block_to_u64(block: &Block) -> u64 {
    let mut low = [0u8; 8];
    low.copy_from_slice(&block[..8]);
    u64::from_le_bytes(low)
}

/// XOR `other` into `block` byte by byte
pub fn xor_in_place(block: &mut Block, other: &Block) {
    for (byte, mask) in block.iter_mut().zip(other.iter()) {
        *byte ^= mask;
    }
}

/// Compute HMAC-SHA-256 of `data` under `key`
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<[u8; SUBKEY_SIZE]> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|e| FpeError::Primitive(e.to_string()))?;
    mac.update(data);

    let mut digest = mac.finalize().into_bytes();
    let mut out = [0u8; SUBKEY_SIZE];
    out.copy_from_slice(&digest);
    digest.as_mut_slice().zeroize();
    Ok(out)
}

/// Derive a sub-key from the master key and a domain-separation label
pub fn derive_subkey(raw_key: &[u8], label: &[u8]) -> Result<SubKey> {
    hmac_sha256(raw_key, label).map(SubKey::new)
}

/// Supported block ciphers for the round function
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockCipherKind {
    /// AES with a 128-bit key
    #[default]
    Aes128,
    /// AES with a 192-bit key
    Aes192,
    /// AES with a 256-bit key
    Aes256,
}

impl BlockCipherKind {
    /// Get the algorithm identifier string
    pub fn algorithm_id(&self) -> &'static str {
        match self {
            Self::Aes128 => "AES-128",
            Self::Aes192 => "AES-192",
            Self::Aes256 => "AES-256",
        }
    }

    /// Key size in bytes
    pub fn key_size(&self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }
}

impl fmt::Display for BlockCipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.algorithm_id())
    }
}

impl FromStr for BlockCipherKind {
    type Err = FpeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "aes128" => Ok(Self::Aes128),
            "aes192" => Ok(Self::Aes192),
            "aes256" => Ok(Self::Aes256),
            _ => Err(FpeError::UnknownCipher(s.to_string())),
        }
    }
}

/// An AES instance keyed for encryption
///
/// Encryption borrows the key schedule immutably, so one instance can be
/// shared across threads.
#[derive(Clone)]
pub enum RoundCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl RoundCipher {
    /// Key a cipher of the given kind with the leading bytes of `key`
    pub fn new(kind: BlockCipherKind, key: &SubKey) -> Result<Self> {
        let key = key.prefix(kind.key_size());
        let primitive = |e: aes::cipher::InvalidLength| FpeError::Primitive(e.to_string());

        Ok(match kind {
            BlockCipherKind::Aes128 => Self::Aes128(Aes128::new_from_slice(key).map_err(primitive)?),
            BlockCipherKind::Aes192 => Self::Aes192(Aes192::new_from_slice(key).map_err(primitive)?),
            BlockCipherKind::Aes256 => Self::Aes256(Aes256::new_from_slice(key).map_err(primitive)?),
        })
    }

    /// Encrypt one block in place
    pub fn encrypt_block(&self, block: &mut Block) {
        let block = GenericArray::from_mut_slice(block);
        match self {
            Self::Aes128(cipher) => cipher.encrypt_block(block),
            Self::Aes192(cipher) => cipher.encrypt_block(block),
            Self::Aes256(cipher) => cipher.encrypt_block(block),
        }
    }

    pub fn kind(&self) -> BlockCipherKind {
        match self {
            Self::Aes128(_) => BlockCipherKind::Aes128,
            Self::Aes192(_) => BlockCipherKind::Aes192,
            Self::Aes256(_) => BlockCipherKind::Aes256,
        }
    }
}

impl fmt::Debug for RoundCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoundCipher({})", self.kind())
    }
}
