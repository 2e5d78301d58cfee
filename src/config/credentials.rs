//! API Credential Management
//!
//! Binance API key/secret pair. Credentials are never logged at INFO/WARN levels
//! and are masked when displayed.

use std::fmt;

/// Secure string wrapper that masks sensitive data in logs
///
/// Debug output shows only `SecretString(***)` and Display shows the truncated
/// form `first4...last4`.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: String) -> Self {
        SecretString(value)
    }

    /// Returns a reference to the inner string
    ///
    /// **Security Warning**: Only use this when actually needed for API calls.
    /// Never log or display the returned value.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns a masked version of the secret for safe logging
    ///
    /// Format: `first4...last4` (e.g., "abcd...wxyz")
    pub fn masked(&self) -> String {
        let s = &self.0;
        if s.len() <= 8 || !s.is_ascii() {
            return "***".to_string();
        }
        format!("{}...{}", &s[..4], &s[s.len() - 4..])
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString(***)")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

/// Binance API credentials
///
/// Only constructible with both halves present and non-blank; a partially
/// configured pair is rejected by [`Credentials::from_parts`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    /// Binance API key (sent as `X-MBX-APIKEY`)
    pub api_key: SecretString,
    /// Binance secret key (HMAC-SHA256 signing key)
    pub api_secret: SecretString,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_secret: SecretString::new(api_secret.into()),
        }
    }

    /// Builds credentials from the optional raw key and secret values
    ///
    /// Returns `Ok(None)` when neither is set, `Ok(Some(..))` when both are set
    /// and non-blank after trimming, and `Err` with a descriptive message for
    /// every other combination.
    pub fn from_parts(
        api_key: Option<String>,
        api_secret: Option<String>,
    ) -> Result<Option<Self>, String> {
        match (api_key, api_secret) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(
                "BINANCE_API_SECRET not set. Configure both BINANCE_API_KEY and \
                 BINANCE_API_SECRET, or neither for public market data only"
                    .to_string(),
            ),
            (None, Some(_)) => Err(
                "BINANCE_API_KEY not set. Configure both BINANCE_API_KEY and \
                 BINANCE_API_SECRET, or neither for public market data only"
                    .to_string(),
            ),
            (Some(key), Some(secret)) => {
                let key = key.trim().to_string();
                let secret = secret.trim().to_string();

                if key.is_empty() {
                    return Err("BINANCE_API_KEY is empty after trimming whitespace".to_string());
                }
                if secret.is_empty() {
                    return Err(
                        "BINANCE_API_SECRET is empty after trimming whitespace".to_string()
                    );
                }

                Ok(Some(Self::new(key, secret)))
            }
        }
    }
}
