//! Binance HTTP Client
//!
//! HTTP client wrapper for making requests to Binance REST API.
//! Provides timeout configuration, user-agent headers, and request signing.

use crate::binance::api::MarketDataApi;
use crate::binance::types::{
    AccountInfo, ApiErrorBody, Balance, DepthResponse, ExchangeInfo, Kline, OneOrMany,
    OrderBookSnapshot, PriceQuote, Ticker24hr, TickerPrice, Trade,
};
use crate::config::{Config, Credentials};
use crate::error::{ProviderError, Result};
use crate::validate::{DepthLimit, KlineInterval, Symbol};
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::de::DeserializeOwned;
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

const USER_AGENT: &str = concat!("binance-context-server/", env!("CARGO_PKG_VERSION"));

/// Signed requests are rejected by Binance when older than this window (ms)
const RECV_WINDOW_MS: u64 = 5000;

/// How a request authenticates itself
enum Auth<'a> {
    /// Public endpoint
    None,
    /// Sends `X-MBX-APIKEY` only
    ApiKey(&'a Credentials),
    /// Sends `X-MBX-APIKEY` plus `timestamp`, `recvWindow` and HMAC `signature`
    Signed(&'a Credentials),
}

/// Binance REST API HTTP client
///
/// Wraps reqwest::Client with Binance-specific configuration including
/// timeouts, base URL, user-agent headers, and API credentials for signing.
#[derive(Clone)]
pub struct BinanceClient {
    /// HTTP client for making requests
    pub(crate) client: Client,
    /// Base URL for Binance API (mainnet, testnet or override)
    pub(crate) base_url: String,
    /// Optional credentials for account endpoints
    pub(crate) credentials: Option<Credentials>,
}

impl std::fmt::Debug for BinanceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials.as_ref().map(|_| "***"))
            .finish()
    }
}

impl BinanceClient {
    /// Creates a client from process configuration
    ///
    /// The configured timeout bounds every request end to end.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: config.credentials.clone(),
        })
    }

    fn require_credentials(&self) -> Result<&Credentials> {
        self.credentials.as_ref().ok_or_else(|| {
            ProviderError::Unauthorized(
                "API credentials not configured. Set BINANCE_API_KEY and BINANCE_API_SECRET \
                 to use account endpoints"
                    .to_string(),
            )
        })
    }

    /// Generates HMAC-SHA256 signature for request parameters
    ///
    /// # Arguments
    /// * `secret` - API secret used as the HMAC key
    /// * `query_string` - URL-encoded query string to sign
    ///
    /// # Returns
    /// Hexadecimal signature string
    fn sign_request(secret: &str, query_string: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| ProviderError::Internal(format!("Invalid secret key: {}", e)))?;

        mac.update(query_string.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Gets current timestamp in milliseconds
    fn get_timestamp() -> Result<u64> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .map_err(|e| ProviderError::Internal(format!("System time error: {}", e)))
    }

    /// Issues one GET request and decodes the JSON body
    ///
    /// Non-success statuses are mapped through [`map_error_response`]; there is
    /// no retry loop.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        auth: Auth<'_>,
    ) -> Result<T> {
        let mut query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let api_key = match auth {
            Auth::None => None,
            Auth::ApiKey(creds) => Some(creds.api_key.expose_secret()),
            Auth::Signed(creds) => {
                if !query.is_empty() {
                    query.push('&');
                }
                query.push_str(&format!(
                    "timestamp={}&recvWindow={}",
                    Self::get_timestamp()?,
                    RECV_WINDOW_MS
                ));
                let signature = Self::sign_request(creds.api_secret.expose_secret(), &query)?;
                query.push_str(&format!("&signature={}", signature));
                Some(creds.api_key.expose_secret())
            }
        };

        let url = if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query)
        };

        let mut request = self.client.get(&url);
        if let Some(key) = api_key {
            request = request.header("X-MBX-APIKEY", key);
        }

        tracing::debug!(path = %path, "Sending Binance API request");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = map_error_response(status.as_u16(), &body);
            tracing::warn!(path = %path, status = status.as_u16(), error = %err, "Binance API request failed");
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| {
            ProviderError::upstream(
                Some(status.as_u16()),
                format!("Malformed response from {}: {}", path, e),
            )
        })
    }
}

/// Converts a non-success Binance response into a [`ProviderError`]
///
/// `{"code":-1121,...}` (invalid symbol) becomes `NotFound`; any other error
/// keeps the HTTP status and Binance's `msg` verbatim.
pub(crate) fn map_error_response(status: u16, body: &str) -> ProviderError {
    if let Ok(api_error) = serde_json::from_str::<ApiErrorBody>(body) {
        if api_error.code == ApiErrorBody::INVALID_SYMBOL {
            return ProviderError::NotFound(api_error.msg);
        }
        return ProviderError::upstream(Some(status), api_error.msg);
    }

    let message = match status {
        429 => "Too many requests to Binance API. Retry after 60 seconds.".to_string(),
        418 => "IP address banned by Binance. Please contact support.".to_string(),
        403 => "WAF limit violated. Please reduce request frequency.".to_string(),
        _ if !body.trim().is_empty() => body.trim().to_string(),
        500..=599 => format!("Binance server error (HTTP {}). Please try again later.", status),
        _ => format!("HTTP error {}", status),
    };

    ProviderError::upstream(Some(status), message)
}

#[async_trait]
impl MarketDataApi for BinanceClient {
    async fn get_price(&self, symbol: &Symbol) -> Result<PriceQuote> {
        let ticker: TickerPrice = self
            .get(
                "/api/v3/ticker/price",
                &[("symbol", symbol.to_string())],
                Auth::None,
            )
            .await?;

        PriceQuote::try_from(ticker).map_err(ProviderError::Internal)
    }

    async fn get_ticker_24h(&self, symbol: Option<&Symbol>) -> Result<Vec<Ticker24hr>> {
        let params: Vec<(&str, String)> = symbol
            .map(|s| vec![("symbol", s.to_string())])
            .unwrap_or_default();

        let tickers: OneOrMany<Ticker24hr> =
            self.get("/api/v3/ticker/24hr", &params, Auth::None).await?;

        Ok(tickers.into_vec())
    }

    async fn get_order_book(
        &self,
        symbol: &Symbol,
        limit: DepthLimit,
    ) -> Result<OrderBookSnapshot> {
        let depth: DepthResponse = self
            .get(
                "/api/v3/depth",
                &[
                    ("symbol", symbol.to_string()),
                    ("limit", limit.get().to_string()),
                ],
                Auth::None,
            )
            .await?;

        Ok(OrderBookSnapshot::from_depth(symbol.as_str(), depth))
    }

    async fn get_klines(
        &self,
        symbol: &Symbol,
        interval: KlineInterval,
        limit: u32,
    ) -> Result<Vec<Kline>> {
        self.get(
            "/api/v3/klines",
            &[
                ("symbol", symbol.to_string()),
                ("interval", interval.to_string()),
                ("limit", limit.to_string()),
            ],
            Auth::None,
        )
        .await
    }

    async fn get_recent_trades(&self, symbol: &Symbol, limit: u32) -> Result<Vec<Trade>> {
        self.get(
            "/api/v3/trades",
            &[
                ("symbol", symbol.to_string()),
                ("limit", limit.to_string()),
            ],
            Auth::None,
        )
        .await
    }

    async fn get_historical_trades(&self, symbol: &Symbol, limit: u32) -> Result<Vec<Trade>> {
        let auth = match &self.credentials {
            Some(creds) => Auth::ApiKey(creds),
            None => Auth::None,
        };

        self.get(
            "/api/v3/historicalTrades",
            &[
                ("symbol", symbol.to_string()),
                ("limit", limit.to_string()),
            ],
            auth,
        )
        .await
    }

    async fn get_account_balance(&self) -> Result<Vec<Balance>> {
        let creds = self.require_credentials()?;

        let account: AccountInfo = self
            .get("/api/v3/account", &[], Auth::Signed(creds))
            .await?;

        Ok(account.balances)
    }

    async fn get_exchange_info(&self, symbol: Option<&Symbol>) -> Result<ExchangeInfo> {
        let params: Vec<(&str, String)> = symbol
            .map(|s| vec![("symbol", s.to_string())])
            .unwrap_or_default();

        let info: ExchangeInfo = self
            .get("/api/v3/exchangeInfo", &params, Auth::None)
            .await?;

        if let Some(symbol) = symbol {
            if info.symbols.is_empty() {
                return Err(ProviderError::NotFound(format!(
                    "No exchange info for symbol {}",
                    symbol
                )));
            }
        }

        Ok(info)
    }
}
