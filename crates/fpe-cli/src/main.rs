//! FPE Demo - prints the permutation a Thorp-shuffle Feistel cipher induces

use clap::Parser;
use fpe_cli::{run, CliConfig, KeySource};
use fpe_crypto::BlockCipherKind;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "fpe-demo")]
#[command(about = "Print the permutation of a format-preserving Feistel cipher over [0, N)")]
#[command(version)]
struct Args {
    /// Number of values in the domain
    #[arg(short = 'n', long, default_value = "17", env = "FPE_DOMAIN_SIZE")]
    domain_size: u64,

    /// Master key as text
    #[arg(short, long, default_value = "secret key", env = "FPE_KEY", hide_env_values = true)]
    key: String,

    /// Master key as hex (overrides --key)
    #[arg(long, env = "FPE_KEY_HEX", hide_env_values = true, conflicts_with = "key_base64")]
    key_hex: Option<String>,

    /// Master key as base64 (overrides --key)
    #[arg(long, env = "FPE_KEY_BASE64", hide_env_values = true)]
    key_base64: Option<String>,

    /// Block cipher inside the round function (aes128, aes192, aes256)
    #[arg(short, long, default_value = "aes128", env = "FPE_CIPHER")]
    cipher: BlockCipherKind,

    /// Maximum number of rows per table
    #[arg(short, long, default_value = "64", env = "FPE_LIMIT")]
    limit: u64,

    /// Enable debug logging
    #[arg(short, long, env = "FPE_DEBUG")]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| format!("fpe_cli={0},fpe_crypto={0}", log_level).into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let key = match (args.key_hex, args.key_base64) {
        (Some(hex), _) => KeySource::Hex(hex),
        (None, Some(base64)) => KeySource::Base64(base64),
        (None, None) => KeySource::Text(args.key),
    };

    let config = CliConfig {
        domain_size: args.domain_size,
        key,
        cipher: args.cipher,
        limit: args.limit,
    };

    tracing::debug!(?config, "starting demo");

    let stdout = std::io::stdout();
    run(&config, &mut stdout.lock())?;
    Ok(())
}
