//! TOML file configuration structures.
//!
//! These structs directly map to the `qiwi-config.toml` file format.

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

/// API credentials and endpoint overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Merchant secret key used for the bills API.
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Merchant public key used for checkout form links.
    #[serde(default)]
    pub public_key: Option<String>,
    /// Override of the bills API base URL.
    #[serde(default)]
    pub bills_url: Option<Url>,
    /// Override of the checkout form base URL.
    #[serde(default)]
    pub payment_url: Option<Url>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[api]
secret_key = "eyJ2ZXJzaW9uIjoi"
public_key = "48e7qUxn9T7RyYE1MVZswX1FRSbE6iyCj2gCRwwF3Dnh5XrasNTx3BGPiMsyXQFNKQhvukniQG8RTVhYm3iP"
bills_url = "http://localhost:8080/bills/"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.secret_key.as_deref(), Some("eyJ2ZXJzaW9uIjoi"));
        assert!(config.api.public_key.is_some());
        assert_eq!(
            config.api.bills_url.unwrap().as_str(),
            "http://localhost:8080/bills/"
        );
        assert!(config.api.payment_url.is_none());
    }

    #[test]
    fn test_empty_config_parsing() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.api.secret_key.is_none());
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let result = toml::from_str::<FileConfig>("[api]\nbills_url = \"not a url\"\n");
        assert!(result.is_err());
    }
}
