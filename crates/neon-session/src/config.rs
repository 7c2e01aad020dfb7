//! Session configuration
//!
//! Stored as JSON. Missing fields fall back to their defaults.

use crate::{Error, Result};
use neon_net::ProbeSettings;
use neon_params::{Network, NetworkType, ScryptParams, MIN_PASSPHRASE_LENGTH};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Session layer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Network the wallet operates on
    pub network: NetworkType,
    /// Minimum passphrase length for encrypted-key logins, in characters
    pub min_passphrase_length: usize,
    /// NEP-2 scrypt parameters
    pub scrypt: ScryptParams,
    /// Connectivity probe
    pub probe: ProbeSettings,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            network: NetworkType::MainNet,
            min_passphrase_length: MIN_PASSPHRASE_LENGTH,
            scrypt: ScryptParams::NEP2,
            probe: ProbeSettings::default(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        info!("Loaded session config from {}", path.display());
        Ok(config)
    }

    /// Save configuration as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.min_passphrase_length == 0 {
            return Err(Error::Config(
                "min_passphrase_length must be at least 1".to_string(),
            ));
        }
        self.scrypt
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;
        self.probe
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(())
    }

    /// Network parameters
    pub fn network(&self) -> Network {
        Network::from_type(self.network)
    }
}
