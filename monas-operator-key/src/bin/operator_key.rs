//! Operator key binary entry point.
//!
//! Wraps a secp256k1 operator private key for import into a KMS and prints
//! the operator address together with the base64 ciphertext.

use anyhow::{Context, Result};
use clap::Parser;
use monas_operator_key::application_service::operator_key_service::DefaultOperatorKeyService;
use monas_operator_key::presentation::cli::{build_command, render_result, Args};
use rand_core::OsRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let config = args
        .resolve_config()
        .context("Failed to load configuration")?;

    // Initialize tracing (stderr, so stdout carries only the result)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    tracing::debug!(?config, "Resolved configuration");

    let command = build_command(&config)?;
    let service = DefaultOperatorKeyService::default();

    let result = service
        .wrap_operator_key(&command, &mut OsRng)
        .context("Failed to wrap operator private key")?;

    println!("{}", render_result(&result));

    Ok(())
}
