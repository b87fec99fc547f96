//! Configuration for the operator key wrapping tool

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration loaded from a TOML file and merged with CLI flags.
///
/// Secrets may be placed here, but passing the private key through the
/// environment or a flag keeps it off disk.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct OperatorKeyConfig {
    /// Operator private key (hex, optional `0x` prefix)
    #[serde(default)]
    pub operator_private_key: Option<String>,

    /// Wrapping RSA public key as inline PEM text
    #[serde(default)]
    pub wrapping_pem: Option<String>,

    /// Path to a file holding the wrapping RSA public key PEM
    #[serde(default)]
    pub wrapping_pem_path: Option<PathBuf>,

    /// RSA modulus size (bits) the importing KMS expects
    #[serde(default)]
    pub expected_rsa_bits: Option<usize>,

    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for OperatorKeyConfig {
    fn default() -> Self {
        Self {
            operator_private_key: None,
            wrapping_pem: None,
            wrapping_pem_path: None,
            expected_rsa_bits: None,
            log_level: default_log_level(),
        }
    }
}

impl OperatorKeyConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Overlay values given explicitly (e.g. from CLI flags). `Some` wins.
    pub fn merge(mut self, overrides: OperatorKeyConfig) -> Self {
        if overrides.operator_private_key.is_some() {
            self.operator_private_key = overrides.operator_private_key;
        }
        if overrides.wrapping_pem.is_some() {
            self.wrapping_pem = overrides.wrapping_pem;
            self.wrapping_pem_path = None;
        }
        if overrides.wrapping_pem_path.is_some() {
            self.wrapping_pem_path = overrides.wrapping_pem_path;
            self.wrapping_pem = None;
        }
        if overrides.expected_rsa_bits.is_some() {
            self.expected_rsa_bits = overrides.expected_rsa_bits;
        }
        self.log_level = overrides.log_level;
        self
    }

    /// Resolve the wrapping PEM text, reading the file if a path is configured.
    ///
    /// Inline PEM takes precedence over the path.
    pub fn resolve_wrapping_pem(&self) -> Result<Option<String>, ConfigError> {
        if let Some(pem) = &self.wrapping_pem {
            return Ok(Some(pem.clone()));
        }
        match &self.wrapping_pem_path {
            Some(path) => std::fs::read_to_string(path)
                .map(Some)
                .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display()))),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for OperatorKeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorKeyConfig")
            .field(
                "operator_private_key",
                &self.operator_private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("wrapping_pem", &self.wrapping_pem.as_ref().map(|p| p.len()))
            .field("wrapping_pem_path", &self.wrapping_pem_path)
            .field("expected_rsa_bits", &self.expected_rsa_bits)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
