//! Configuration Management
//!
//! Process-wide settings read once at startup: API credentials, testnet flag,
//! REST base URL and per-call timeout. Read-only after construction.

pub mod credentials;

pub use credentials::{Credentials, SecretString};

use std::time::Duration;
use thiserror::Error;

/// Production REST endpoint
pub const MAINNET_BASE_URL: &str = "https://api.binance.com";

/// Spot testnet REST endpoint
pub const TESTNET_BASE_URL: &str = "https://testnet.binance.vision";

/// Default per-call HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const MAX_TIMEOUT_SECS: u64 = 120;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid credentials: {0}")]
    Credentials(String),

    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration
///
/// ## Environment Variables
///
/// - `BINANCE_API_KEY` / `BINANCE_API_SECRET`: optional credential pair
/// - `BINANCE_TESTNET`: use the spot testnet (default: false)
/// - `BINANCE_BASE_URL`: explicit REST base URL, overrides the testnet flag
/// - `BINANCE_TIMEOUT_SECS`: per-call timeout (default: 10)
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` limits the server to public market data
    pub credentials: Option<Credentials>,
    pub testnet: bool,
    /// REST base URL without trailing slash
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: None,
            testnet: false,
            base_url: MAINNET_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Blank values count as unset for the flag, URL and timeout variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let credentials =
            Credentials::from_parts(lookup("BINANCE_API_KEY"), lookup("BINANCE_API_SECRET"))
                .map_err(ConfigError::Credentials)?;

        let testnet = match non_blank("BINANCE_TESTNET") {
            Some(raw) => parse_flag("BINANCE_TESTNET", &raw)?,
            None => false,
        };

        let base_url = match non_blank("BINANCE_BASE_URL") {
            Some(raw) => {
                let url = raw.trim().trim_end_matches('/').to_string();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidValue {
                        name: "BINANCE_BASE_URL",
                        value: raw,
                        reason: "must start with http:// or https://".to_string(),
                    });
                }
                url
            }
            None if testnet => TESTNET_BASE_URL.to_string(),
            None => MAINNET_BASE_URL.to_string(),
        };

        let timeout_secs = match non_blank("BINANCE_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    name: "BINANCE_TIMEOUT_SECS",
                    value: raw.clone(),
                    reason: "expected a whole number of seconds".to_string(),
                })?;
                if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
                    return Err(ConfigError::InvalidValue {
                        name: "BINANCE_TIMEOUT_SECS",
                        value: raw,
                        reason: format!("must be between 1 and {}", MAX_TIMEOUT_SECS),
                    });
                }
                secs
            }
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            credentials,
            testnet,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Human-readable environment name for startup logging
    pub fn environment(&self) -> &'static str {
        if self.testnet {
            "testnet"
        } else {
            "mainnet"
        }
    }
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: raw.to_string(),
            reason: "expected true/false, 1/0, yes/no or on/off".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = config_from(&[]).expect("empty environment is valid");

        assert!(config.credentials.is_none());
        assert!(!config.testnet);
        assert_eq!(config.base_url, MAINNET_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.environment(), "mainnet");
    }

    #[test]
    fn test_testnet_selects_sandbox_url() {
        let config = config_from(&[("BINANCE_TESTNET", "true")]).unwrap();
        assert!(config.testnet);
        assert_eq!(config.base_url, TESTNET_BASE_URL);
        assert_eq!(config.environment(), "testnet");
    }

    #[test]
    fn test_base_url_override_wins() {
        let config = config_from(&[
            ("BINANCE_TESTNET", "1"),
            ("BINANCE_BASE_URL", "http://127.0.0.1:9000/"),
        ])
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_credentials_loaded() {
        let config = config_from(&[
            ("BINANCE_API_KEY", "key"),
            ("BINANCE_API_SECRET", "secret"),
        ])
        .unwrap();
        assert!(config.has_credentials());
    }

    #[test]
    fn test_malformed_flag_rejected() {
        let err = config_from(&[("BINANCE_TESTNET", "maybe")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "BINANCE_TESTNET",
                ..
            }
        ));
    }

    #[test]
    fn test_timeout_bounds() {
        assert!(config_from(&[("BINANCE_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("BINANCE_TIMEOUT_SECS", "abc")]).is_err());
        let config = config_from(&[("BINANCE_TIMEOUT_SECS", "30")]).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_half_credentials_rejected() {
        let err = config_from(&[("BINANCE_API_KEY", "key")]).unwrap_err();
        assert!(matches!(err, ConfigError::Credentials(_)));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(config_from(&[("BINANCE_BASE_URL", "api.binance.com")]).is_err());
    }
}
