//! Configuration for the payment verifier.

use crate::address::{AddressCodec, AddressFormat};
use crate::calldata::PaddingPolicy;
use crate::token::{default_entries, KnownContracts, TokenKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Verifier configuration.
///
/// Scalars come before tables so the TOML output stays valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Handling of non-zero padding in token transfer address words.
    #[serde(default)]
    pub call_padding: PaddingPolicy,

    /// Address constants of the target network.
    #[serde(default)]
    pub network: AddressFormat,

    /// Token contracts, keyed by address in either form.
    #[serde(default = "default_contracts")]
    pub contracts: BTreeMap<String, TokenKind>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            call_padding: PaddingPolicy::default(),
            network: AddressFormat::default(),
            contracts: default_contracts(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_contracts() -> BTreeMap<String, TokenKind> {
    default_entries()
        .into_iter()
        .map(|(address, kind)| (address.to_string(), kind))
        .collect()
}

/// Default location of the configuration file.
#[must_use]
pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "tronpay")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".tronpay/config.toml"))
}

impl VerifierConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn to_file(&self, path: &std::path::Path) -> crate::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Address codec for the configured network.
    #[must_use]
    pub fn codec(&self) -> AddressCodec {
        AddressCodec::new(self.network)
    }

    /// Known-contract table for the configured network.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any contract address is invalid.
    pub fn known_contracts(&self) -> crate::Result<KnownContracts> {
        KnownContracts::new(
            self.codec(),
            self.contracts.iter().map(|(address, kind)| (address, *kind)),
        )
    }
}
