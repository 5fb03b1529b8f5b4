//! Wallet configuration.

use serde::Deserialize;
use std::path::Path;

use crate::error::WalletError;

/// Connection settings for the wallet, loadable from a TOML file.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Base URL of the node's JSON-RPC endpoint.
    pub node_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            node_url: "http://127.0.0.1:5005".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl WalletConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WalletError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| WalletError::Config(format!("failed to read config file: {e}")))?;
        toml::from_str(&raw).map_err(|e| WalletError::Config(format!("invalid config file: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let config = WalletConfig::default();
        assert_eq!(config.node_url, "http://127.0.0.1:5005");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "node_url = \"http://node.example:5005\"").unwrap();
        let config = WalletConfig::load(file.path()).unwrap();
        assert_eq!(config.node_url, "http://node.example:5005");
        assert_eq!(config.connect_timeout_secs, 10);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(matches!(
            WalletConfig::load("/nonexistent/trellis.toml"),
            Err(WalletError::Config(_))
        ));
    }
}
