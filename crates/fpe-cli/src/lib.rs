//! # FPE Demo
//!
//! Builds a format-preserving cipher over a small domain and prints the
//! permutation it induces, in both directions:
//!
//! ```text
//! Encryption:
//!  0 -> 13
//!  1 ->  4
//!  ...
//! Decryption:
//!  0 ->  6
//!  ...
//! ```
//!
//! Every printed row is checked to round-trip before the tables are written.

pub mod config;
pub mod error;

pub use config::{CliConfig, KeySource};
pub use error::{CliError, Result};

use fpe_crypto::{FeistelCipher, RoundFunction};
use std::io::Write;
use tracing::{debug, info};

/// Direction of a printed table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    fn heading(&self) -> &'static str {
        match self {
            Self::Encrypt => "Encryption:",
            Self::Decrypt => "Decryption:",
        }
    }
}

/// Build the cipher described by `config`
pub fn build_cipher(config: &CliConfig) -> Result<FeistelCipher> {
    config.validate()?;
    let key = config.key.resolve()?;
    Ok(FeistelCipher::with_config(config.domain_size, &key, &config.fpe_config())?)
}

/// Check `decrypt(encrypt(i)) == i` for the first `rows` values
pub fn verify_roundtrip<F: RoundFunction>(cipher: &FeistelCipher<F>, rows: u64) -> Result<()> {
    for value in 0..rows {
        let encrypted = cipher.encrypt(value)?;
        let decrypted = cipher.decrypt(encrypted)?;
        if decrypted != value {
            return Err(CliError::RoundTrip {
                value,
                encrypted,
                decrypted,
            });
        }
    }
    debug!(rows, "round-trip verified");
    Ok(())
}

/// Render `i -> f(i)` rows for the first `rows` values, right-aligned
pub fn render_table<F: RoundFunction>(
    cipher: &FeistelCipher<F>,
    direction: Direction,
    rows: u64,
) -> Result<String> {
    let width = (cipher.domain_size() - 1).to_string().len();
    let mut table = String::new();
    table.push_str(direction.heading());
    table.push('\n');

    for value in 0..rows {
        let mapped = match direction {
            Direction::Encrypt => cipher.encrypt(value)?,
            Direction::Decrypt => cipher.decrypt(value)?,
        };
        table.push_str(&format!("{:>width$} -> {:>width$}\n", value, mapped, width = width));
    }
    Ok(table)
}

/// Build, verify and print both tables
pub fn run(config: &CliConfig, out: &mut impl Write) -> Result<()> {
    let cipher = build_cipher(config)?;
    let rows = config.rows();

    info!(
        domain_size = config.domain_size,
        cipher = %config.cipher,
        rows,
        "printing permutation"
    );
    if rows < config.domain_size {
        info!("table truncated to {} of {} values", rows, config.domain_size);
    }

    verify_roundtrip(&cipher, rows)?;

    writeln!(out, "Test Format Preserving Feistel Cipher:")?;
    out.write_all(render_table(&cipher, Direction::Encrypt, rows)?.as_bytes())?;
    out.write_all(render_table(&cipher, Direction::Decrypt, rows)?.as_bytes())?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpe_crypto::BlockCipherKind;
    use rstest::rstest;

    #[test_log::test]
    fn test_run_reference_tables() {
        let mut out = Vec::new();
        run(&CliConfig::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Test Format Preserving Feistel Cipher:");
        assert_eq!(lines[1], "Encryption:");
        assert_eq!(lines[2], " 0 -> 13");
        assert_eq!(lines[3], " 1 ->  4");
        assert_eq!(lines[19], "Decryption:");
        assert_eq!(lines[20], " 0 ->  6");
        assert_eq!(lines.len(), 1 + 2 * 18);
    }

    #[rstest]
    #[case(BlockCipherKind::Aes128)]
    #[case(BlockCipherKind::Aes192)]
    #[case(BlockCipherKind::Aes256)]
    fn test_tables_are_permutations(#[case] cipher_kind: BlockCipherKind) {
        let config = CliConfig {
            domain_size: 50,
            cipher: cipher_kind,
            ..Default::default()
        };
        let cipher = build_cipher(&config).unwrap();
        let table = render_table(&cipher, Direction::Encrypt, config.rows()).unwrap();

        let mut mapped: Vec<u64> = table
            .lines()
            .skip(1)
            .map(|line| line.split("->").nth(1).unwrap().trim().parse().unwrap())
            .collect();
        mapped.sort_unstable();
        assert_eq!(mapped, (0..50).collect::<Vec<u64>>());
    }

    #[test]
    fn test_limit_truncates_rows() {
        let config = CliConfig {
            domain_size: 1_000_000,
            limit: 5,
            ..Default::default()
        };
        let mut out = Vec::new();
        run(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1 + 2 * 6);
        assert!(text.contains("     0 -> "));
    }

    #[test]
    fn test_invalid_domain_surfaces() {
        let config = CliConfig {
            domain_size: 0,
            ..Default::default()
        };
        let err = run(&config, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Crypto(ref e) if e.is_domain_error()));
    }
}
