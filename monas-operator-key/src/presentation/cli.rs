//! Command-line surface of the operator key tool.

use clap::Parser;
use std::path::PathBuf;

use crate::application_service::operator_key_service::{
    WrapOperatorKeyCommand, WrapOperatorKeyResult,
};
use crate::config::{ConfigError, OperatorKeyConfig};
use crate::error::OperatorKeyError;

/// Operator key CLI arguments.
#[derive(Parser, Default)]
#[command(name = "monas-operator-key")]
#[command(about = "Wrap a secp256k1 operator key for import into a KMS")]
pub struct Args {
    /// Operator private key (hex, optional 0x prefix).
    #[arg(
        long = "operator-priv",
        env = "MONAS_OPERATOR_PRIV",
        hide_env_values = true
    )]
    pub operator_priv: Option<String>,

    /// Wrapping RSA public key as PEM text. Escaped `\n` sequences are accepted.
    #[arg(long, env = "MONAS_WRAPPING_PEM", allow_hyphen_values = true)]
    pub wrapping_pem: Option<String>,

    /// File containing the wrapping RSA public key PEM. Wins over `--wrapping-pem`.
    #[arg(long)]
    pub wrapping_pem_file: Option<PathBuf>,

    /// Fail unless the wrapping key has this modulus size in bits.
    #[arg(long)]
    pub expected_rsa_bits: Option<usize>,

    /// Optional TOML configuration file. Flags take precedence over it.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field(
                "operator_priv",
                &self.operator_priv.as_ref().map(|_| "<redacted>"),
            )
            .field("wrapping_pem", &self.wrapping_pem.as_ref().map(|p| p.len()))
            .field("wrapping_pem_file", &self.wrapping_pem_file)
            .field("expected_rsa_bits", &self.expected_rsa_bits)
            .field("config", &self.config)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Args {
    /// Load the config file (if any) and overlay the flags on top of it.
    pub fn resolve_config(&self) -> Result<OperatorKeyConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => OperatorKeyConfig::from_file(path)?,
            None => OperatorKeyConfig::default(),
        };

        let log_level = self
            .log_level
            .clone()
            .unwrap_or_else(|| base.log_level.clone());

        Ok(base.merge(OperatorKeyConfig {
            operator_private_key: self.operator_priv.clone(),
            wrapping_pem: self.wrapping_pem.clone(),
            wrapping_pem_path: self.wrapping_pem_file.clone(),
            expected_rsa_bits: self.expected_rsa_bits,
            log_level,
        }))
    }
}

/// Build the wrap command from resolved configuration. Both key inputs are required.
pub fn build_command(
    config: &OperatorKeyConfig,
) -> Result<WrapOperatorKeyCommand, OperatorKeyError> {
    let operator_private_key = config
        .operator_private_key
        .clone()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| OperatorKeyError::Input("operator private key is required".into()))?;

    let wrapping_pem = config
        .resolve_wrapping_pem()
        .map_err(|e| OperatorKeyError::Input(e.to_string()))?
        .ok_or_else(|| OperatorKeyError::Input("wrapping public key PEM is required".into()))?;

    Ok(WrapOperatorKeyCommand {
        operator_private_key,
        wrapping_pem,
        expected_rsa_bits: config.expected_rsa_bits,
    })
}

/// Render the result for stdout.
pub fn render_result(result: &WrapOperatorKeyResult) -> String {
    format!(
        "Operator Public Key: {}\nCiphertext: {}",
        result.operator_address, result.ciphertext
    )
}
