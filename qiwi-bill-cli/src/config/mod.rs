//! Configuration module for the qiwi-bill CLI.
//!
//! Handles loading configuration from the TOML file and applying the
//! command-line / environment overrides.

pub mod file;

use crate::config::file::FileConfig;
use qiwi_bill_sdk::client::BillPaymentsClient;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("no secret key configured (set api.secret_key or QIWI_SECRET_KEY)")]
    MissingSecretKey,

    #[error("no public key configured (set api.public_key)")]
    MissingPublicKey,
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub secret_key: String,
    pub public_key: Option<String>,
    pub bills_url: Option<Url>,
    pub payment_url: Option<Url>,
}

impl LoadedConfig {
    /// Build the SDK client described by this configuration.
    pub fn client(&self) -> BillPaymentsClient {
        let mut client = BillPaymentsClient::new(&self.secret_key);
        if let Some(url) = &self.bills_url {
            client = client.with_bills_url(url.clone());
        }
        if let Some(url) = &self.payment_url {
            client = client.with_payment_url(url.clone());
        }
        client
    }

    /// The public key, required for checkout form links.
    pub fn public_key(&self) -> Result<&str, ConfigError> {
        self.public_key
            .as_deref()
            .ok_or(ConfigError::MissingPublicKey)
    }
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    secret_override: Option<String>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, secret_override: Option<String>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            secret_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// A missing file is treated as an empty one so that a secret passed
    /// through the environment is enough to run.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let file_config = match std::fs::read_to_string(&self.config_path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?self.config_path, "Config file not found, using defaults");
                FileConfig::default()
            }
            Err(e) => return Err(e.into()),
        };

        self.resolve(file_config)
    }

    fn resolve(&self, file_config: FileConfig) -> Result<LoadedConfig, ConfigError> {
        let api = file_config.api;
        let secret_key = self
            .secret_override
            .clone()
            .or(api.secret_key)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingSecretKey)?;

        Ok(LoadedConfig {
            secret_key,
            public_key: api.public_key,
            bills_url: api.bills_url,
            payment_url: api.payment_url,
        })
    }
}
