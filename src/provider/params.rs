//! Tool parameter types
//!
//! Each struct doubles as the tool's advertised JSON Schema. Numeric limits
//! are taken as signed integers so that zero and negative values reach the
//! validator and get a range error instead of a type error.

use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SymbolParams {
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT, ETHUSDT)")]
    pub symbol: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TopCryptocurrenciesParams {
    #[serde(default)]
    #[schemars(description = "Number of symbols to return, 1 to 50 (default: 10)")]
    pub limit: Option<i64>,

    #[serde(default)]
    #[schemars(description = "Quote asset to filter pairs by, e.g. USDT, BTC, ETH (default: USDT)")]
    pub quote_asset: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct OrderBookParams {
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT)")]
    pub symbol: String,

    #[serde(default)]
    #[schemars(description = "Depth limit: 5, 10, 20, 50, 100, 500, 1000 or 5000 (default: 20)")]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CandlestickParams {
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT)")]
    pub symbol: String,

    #[serde(default)]
    #[schemars(
        description = "Kline interval: 1s, 1m, 3m, 5m, 15m, 30m, 1h, 2h, 4h, 6h, 8h, 12h, 1d, 3d, 1w, 1M (default: 1h)"
    )]
    pub interval: Option<String>,

    #[serde(default)]
    #[schemars(description = "Number of candles, 1 to 1000 (default: 100)")]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TradesParams {
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT)")]
    pub symbol: String,

    #[serde(default)]
    #[schemars(description = "Number of trades, 1 to 1000 (default: 500)")]
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ExchangeInfoParams {
    #[serde(default)]
    #[schemars(description = "Trading pair symbol; omit for an exchange-wide summary")]
    pub symbol: Option<String>,
}

/// `get_account_balance` takes no arguments
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NoParams {}
