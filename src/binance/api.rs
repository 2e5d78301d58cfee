//! Market data client contract
//!
//! One method per Binance endpoint the server consumes. Arguments arrive
//! already validated; every call issues at most one outbound request.

use crate::binance::types::{
    Balance, ExchangeInfo, Kline, OrderBookSnapshot, PriceQuote, Ticker24hr, Trade,
};
use crate::error::Result;
use crate::validate::{DepthLimit, KlineInterval, Symbol};
use async_trait::async_trait;

#[async_trait]
pub trait MarketDataApi: Send + Sync {
    /// Latest price (GET /api/v3/ticker/price)
    async fn get_price(&self, symbol: &Symbol) -> Result<PriceQuote>;

    /// 24h statistics (GET /api/v3/ticker/24hr); every traded pair when `symbol` is `None`
    async fn get_ticker_24h(&self, symbol: Option<&Symbol>) -> Result<Vec<Ticker24hr>>;

    /// Order book depth (GET /api/v3/depth)
    async fn get_order_book(&self, symbol: &Symbol, limit: DepthLimit)
        -> Result<OrderBookSnapshot>;

    /// Candlesticks in ascending open time (GET /api/v3/klines)
    async fn get_klines(
        &self,
        symbol: &Symbol,
        interval: KlineInterval,
        limit: u32,
    ) -> Result<Vec<Kline>>;

    /// Most recent trades (GET /api/v3/trades)
    async fn get_recent_trades(&self, symbol: &Symbol, limit: u32) -> Result<Vec<Trade>>;

    /// Older trades (GET /api/v3/historicalTrades)
    async fn get_historical_trades(&self, symbol: &Symbol, limit: u32) -> Result<Vec<Trade>>;

    /// Account balances (signed GET /api/v3/account)
    ///
    /// Fails with `Unauthorized` before any request when no credentials are configured.
    async fn get_account_balance(&self) -> Result<Vec<Balance>>;

    /// Trading rules and symbol metadata (GET /api/v3/exchangeInfo)
    async fn get_exchange_info(&self, symbol: Option<&Symbol>) -> Result<ExchangeInfo>;
}
