//! tronpay CLI entry point.

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use color_eyre::eyre::eyre;
use num_bigint::BigUint;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tronpay::amount::parse_integer;
use tronpay::{
    parse_trongrid_response, to_decimal, to_smallest_unit, ExpectedPayment, TransactionVerifier,
    VerifierConfig,
};

fn main() -> color_eyre::Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();
    let config = cli.load_config()?;

    // Initialize tracing; stdout carries command output only
    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    debug!("tronpay v{}", env!("CARGO_PKG_VERSION"));

    let valid = run(cli.command, &config)?;
    if !valid {
        std::process::exit(1);
    }
    Ok(())
}

/// Run one command. Returns false when a verification was rejected.
fn run(command: Command, config: &VerifierConfig) -> color_eyre::Result<bool> {
    let codec = config.codec();
    match command {
        Command::Verify {
            record,
            tx_id,
            to,
            amount,
            raw_amount,
            token,
            contract,
        } => {
            let verifier = TransactionVerifier::from_config(config)?;
            let json = std::fs::read_to_string(&record)?;
            let record = parse_trongrid_response(&json)?;

            let mut expected = if raw_amount {
                let amount: BigUint = parse_integer(&amount)?;
                let expected = ExpectedPayment::new(to, amount, token);
                match verifier.contracts().contract_for(token) {
                    Some(address) if !token.is_native() => expected.with_contract(address),
                    _ => expected,
                }
            } else {
                ExpectedPayment::for_request(to, &amount, token, verifier.contracts())?
            };
            if let Some(contract) = contract {
                expected = expected.with_contract(contract);
            }

            let verdict = match (tx_id.as_deref(), record.as_ref()) {
                (Some(id), record) => verifier.verify_by_id(id, record, &expected),
                (None, Some(record)) => verifier.verify(record, &expected),
                (None, None) => return Err(eyre!("record file holds no transaction")),
            };

            println!("{}", serde_json::to_string_pretty(&verdict)?);
            info!("Verdict: {}", if verdict.valid { "valid" } else { "invalid" });
            Ok(verdict.valid)
        }
        Command::ToText { hex } => {
            println!("{}", codec.hex_to_text(&hex)?);
            Ok(true)
        }
        Command::ToHex { text } => {
            println!("{}", codec.text_to_hex(&text)?);
            Ok(true)
        }
        Command::ToSmallest { amount, decimals } => {
            println!("{}", to_smallest_unit(&amount, decimals)?);
            Ok(true)
        }
        Command::ToDecimal { amount, decimals } => {
            println!("{}", to_decimal(&amount, decimals)?);
            Ok(true)
        }
    }
}
