//! Binance API Type Definitions
//!
//! Wire types for Binance REST responses plus the request-scoped values the
//! client hands back to the dispatcher. Price and quantity strings are kept
//! verbatim unless a type states otherwise.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Response from /api/v3/ticker/price endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerPrice {
    /// Trading pair symbol (e.g., "BTCUSDT")
    pub symbol: String,
    /// Current price as string to preserve precision
    pub price: String,
}

/// Latest price for one symbol, parsed to an exact decimal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub symbol: String,
    /// Serialized as a decimal string
    pub price: Decimal,
}

impl TryFrom<TickerPrice> for PriceQuote {
    type Error = String;

    fn try_from(ticker: TickerPrice) -> Result<Self, Self::Error> {
        let price = Decimal::from_str(&ticker.price)
            .map_err(|e| format!("unparsable price {:?} for {}: {}", ticker.price, ticker.symbol, e))?;
        if price.is_sign_negative() {
            return Err(format!("negative price {} for {}", price, ticker.symbol));
        }

        Ok(Self {
            symbol: ticker.symbol,
            price,
        })
    }
}

/// Response from /api/v3/ticker/24hr endpoint
///
/// Returns 24-hour rolling window price statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ticker24hr {
    /// Trading pair symbol
    pub symbol: String,
    /// Price change
    pub price_change: String,
    /// Price change percent
    pub price_change_percent: String,
    /// Weighted average price
    pub weighted_avg_price: String,
    /// Previous close price
    pub prev_close_price: String,
    /// Last price
    pub last_price: String,
    /// Last quantity
    pub last_qty: String,
    /// Best bid price
    pub bid_price: String,
    /// Best ask price
    pub ask_price: String,
    /// Open price
    pub open_price: String,
    /// High price
    pub high_price: String,
    /// Low price
    pub low_price: String,
    /// Total traded base asset volume
    pub volume: String,
    /// Total traded quote asset volume
    pub quote_volume: String,
    /// Open time
    pub open_time: i64,
    /// Close time
    pub close_time: i64,
    /// First trade ID
    pub first_id: i64,
    /// Last trade ID
    pub last_id: i64,
    /// Total number of trades
    pub count: i64,
}

/// `/api/v3/ticker/24hr` answers with an object when a symbol is given and
/// an array otherwise
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// One order book level: (price, quantity), both verbatim decimal strings
pub type PriceLevel = (String, String);

/// Response from /api/v3/depth endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthResponse {
    /// Last update ID
    pub last_update_id: i64,
    /// Bid levels [price, quantity]
    pub bids: Vec<PriceLevel>,
    /// Ask levels [price, quantity]
    pub asks: Vec<PriceLevel>,
}

/// Order book for one symbol
///
/// Bids and asks keep the upstream order (best price first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBookSnapshot {
    pub symbol: String,
    pub last_update_id: i64,
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

impl OrderBookSnapshot {
    pub fn from_depth(symbol: impl Into<String>, depth: DepthResponse) -> Self {
        Self {
            symbol: symbol.into(),
            last_update_id: depth.last_update_id,
            bids: depth.bids,
            asks: depth.asks,
        }
    }
}

/// One candlestick from /api/v3/klines
///
/// Upstream array format: [open_time, open, high, low, close, volume,
/// close_time, quote_volume, trades, taker_buy_base, taker_buy_quote, ignore]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Value>")]
pub struct Kline {
    pub open_time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub close_time: i64,
    pub quote_volume: Decimal,
    pub trades: u64,
}

impl TryFrom<Vec<Value>> for Kline {
    type Error = String;

    fn try_from(row: Vec<Value>) -> Result<Self, Self::Error> {
        if row.len() < 9 {
            return Err(format!("kline row has {} fields, expected at least 9", row.len()));
        }

        Ok(Self {
            open_time: int_at(&row, 0, "open_time")?,
            open: decimal_at(&row, 1, "open")?,
            high: decimal_at(&row, 2, "high")?,
            low: decimal_at(&row, 3, "low")?,
            close: decimal_at(&row, 4, "close")?,
            volume: decimal_at(&row, 5, "volume")?,
            close_time: int_at(&row, 6, "close_time")?,
            quote_volume: decimal_at(&row, 7, "quote_volume")?,
            trades: row[8]
                .as_u64()
                .ok_or_else(|| format!("kline field trades is not an integer: {}", row[8]))?,
        })
    }
}

fn int_at(row: &[Value], idx: usize, name: &str) -> Result<i64, String> {
    row[idx]
        .as_i64()
        .ok_or_else(|| format!("kline field {} is not an integer: {}", name, row[idx]))
}

fn decimal_at(row: &[Value], idx: usize, name: &str) -> Result<Decimal, String> {
    match &row[idx] {
        Value::String(s) => Decimal::from_str(s)
            .map_err(|e| format!("kline field {} is not a decimal ({:?}): {}", name, s, e)),
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .map_err(|e| format!("kline field {} is not a decimal ({}): {}", name, n, e)),
        other => Err(format!("kline field {} is not a decimal: {}", name, other)),
    }
}

/// Response item from /api/v3/trades and /api/v3/historicalTrades
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// Trade ID
    pub id: i64,
    /// Price
    pub price: String,
    /// Quantity
    pub qty: String,
    /// Quote quantity
    #[serde(default)]
    pub quote_qty: String,
    /// Trade time
    pub time: i64,
    /// Was the buyer the maker?
    pub is_buyer_maker: bool,
    /// Was the trade the best price match?
    #[serde(default)]
    pub is_best_match: bool,
}

/// One asset balance from /api/v3/account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub asset: String,
    pub free: String,
    pub locked: String,
}

/// Response from /api/v3/account (only the fields this server uses)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default)]
    pub balances: Vec<Balance>,
}

/// One symbol entry of /api/v3/exchangeInfo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SymbolInfo {
    pub symbol: String,
    pub status: String,
    pub base_asset: String,
    pub quote_asset: String,
    pub is_spot_trading_allowed: bool,
    pub is_margin_trading_allowed: bool,
    pub filters: Vec<Value>,
}

/// Response from /api/v3/exchangeInfo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExchangeInfo {
    pub timezone: String,
    pub server_time: i64,
    pub rate_limits: Vec<Value>,
    pub exchange_filters: Vec<Value>,
    pub symbols: Vec<SymbolInfo>,
}

/// Error body Binance returns with non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}

impl ApiErrorBody {
    /// Binance error code for an unknown trading pair
    pub const INVALID_SYMBOL: i64 = -1121;
}
