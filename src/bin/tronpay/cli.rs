//! Command-line interface definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tronpay::amount::DEFAULT_DECIMALS;
use tronpay::config::default_config_path;
use tronpay::{TokenKind, VerifierConfig};

/// Verify TRON payments and convert addresses and amounts.
#[derive(Parser, Debug)]
#[command(name = "tronpay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level (overrides the configuration file).
    #[arg(long, env = "RUST_LOG")]
    pub log_level: Option<String>,

    /// Path to configuration file.
    #[arg(long, short, env = "TRONPAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Verify an indexer transaction response against an expected payment.
    Verify {
        /// File holding the `gettransactionbyid` JSON response.
        #[arg(long)]
        record: PathBuf,

        /// Transaction id the record was fetched for.
        #[arg(long)]
        tx_id: Option<String>,

        /// Expected destination address (hex or text form).
        #[arg(long)]
        to: String,

        /// Expected amount in human units.
        #[arg(long)]
        amount: String,

        /// Treat `--amount` as smallest units.
        #[arg(long)]
        raw_amount: bool,

        /// Expected token (TRX, USDT, USDC, OTHER).
        #[arg(long, default_value = "TRX")]
        token: TokenKind,

        /// Expected token contract (defaults to the configured one).
        #[arg(long)]
        contract: Option<String>,
    },

    /// Convert a hex address (41...) to text form (T...).
    ToText {
        /// Hex address.
        hex: String,
    },

    /// Convert a text address (T...) to hex form (41...).
    ToHex {
        /// Text address.
        text: String,
    },

    /// Convert a decimal amount to smallest units.
    ToSmallest {
        /// Decimal amount.
        amount: String,

        /// Fractional digits.
        #[arg(long, default_value_t = DEFAULT_DECIMALS)]
        decimals: u32,
    },

    /// Convert a smallest-unit amount to a decimal amount.
    ToDecimal {
        /// Integer amount.
        amount: String,

        /// Fractional digits.
        #[arg(long, default_value_t = DEFAULT_DECIMALS)]
        decimals: u32,
    },
}

impl Cli {
    /// Load the configuration file, falling back to defaults.
    ///
    /// An explicit `--config` must exist; the default location is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is present but cannot be loaded.
    pub fn load_config(&self) -> color_eyre::Result<VerifierConfig> {
        if let Some(ref path) = self.config {
            return Ok(VerifierConfig::from_file(path)?);
        }

        let path = default_config_path();
        if path.exists() {
            Ok(VerifierConfig::from_file(&path)?)
        } else {
            Ok(VerifierConfig::default())
        }
    }
}
