//! Tool dispatch
//!
//! Each tool validates its arguments, makes its client calls and reshapes the
//! result. A handler only reaches the client once every argument is valid.

use crate::aggregate::{
    self, exchange_summary, non_zero_balances, order_book_summary, symbol_detail, top_by_volume,
    KlineSummary, OrderBookSummary, Trend,
};
use crate::binance::{MarketDataApi, OrderBookSnapshot, Ticker24hr};
use crate::error::{ProviderError, Result};
use crate::provider::params::{
    CandlestickParams, ExchangeInfoParams, NoParams, OrderBookParams, SymbolParams,
    TopCryptocurrenciesParams, TradesParams,
};
use crate::validate::{self, DepthLimit, KlineInterval, LimitRange, Symbol};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Every tool the server exposes
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum ToolName {
    GetCryptoPrice,
    GetMarketStats,
    GetTopCryptocurrencies,
    GetOrderBook,
    GetCandlestickData,
    GetRecentTrades,
    GetHistoricalTrades,
    GetAccountBalance,
    GetExchangeInfo,
}

impl ToolName {
    pub fn description(self) -> &'static str {
        match self {
            ToolName::GetCryptoPrice => "Get the current price of a cryptocurrency trading pair",
            ToolName::GetMarketStats => {
                "Get 24-hour price change statistics and trend for a trading pair"
            }
            ToolName::GetTopCryptocurrencies => {
                "Get the top trading pairs by 24-hour volume for a quote asset"
            }
            ToolName::GetOrderBook => {
                "Get order book bids and asks for a trading pair with a spread and depth summary"
            }
            ToolName::GetCandlestickData => {
                "Get candlestick (kline) data for a trading pair with summary statistics"
            }
            ToolName::GetRecentTrades => "Get the most recent trades for a trading pair",
            ToolName::GetHistoricalTrades => "Get older trades for a trading pair",
            ToolName::GetAccountBalance => {
                "Get non-zero account balances (requires API key and secret)"
            }
            ToolName::GetExchangeInfo => {
                "Get trading rules for a symbol, or an exchange-wide summary when no symbol is given"
            }
        }
    }
}

#[derive(Serialize)]
struct MarketStats {
    #[serde(flatten)]
    ticker: Ticker24hr,
    trend: Trend,
}

#[derive(Serialize)]
struct OrderBookView {
    #[serde(flatten)]
    book: OrderBookSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<OrderBookSummary>,
}

/// Route a tool call to its handler
pub(crate) async fn route_tool(
    api: &dyn MarketDataApi,
    tool: ToolName,
    args: Map<String, Value>,
) -> Result<Value> {
    tracing::debug!(tool = %tool, "routing tool");

    match tool {
        ToolName::GetCryptoPrice => handle_get_crypto_price(api, parse_args(tool, args)?).await,
        ToolName::GetMarketStats => handle_get_market_stats(api, parse_args(tool, args)?).await,
        ToolName::GetTopCryptocurrencies => {
            handle_get_top_cryptocurrencies(api, parse_args(tool, args)?).await
        }
        ToolName::GetOrderBook => handle_get_order_book(api, parse_args(tool, args)?).await,
        ToolName::GetCandlestickData => {
            handle_get_candlestick_data(api, parse_args(tool, args)?).await
        }
        ToolName::GetRecentTrades => handle_get_trades(api, parse_args(tool, args)?, false).await,
        ToolName::GetHistoricalTrades => {
            handle_get_trades(api, parse_args(tool, args)?, true).await
        }
        ToolName::GetAccountBalance => {
            let _: NoParams = parse_args(tool, args)?;
            handle_get_account_balance(api).await
        }
        ToolName::GetExchangeInfo => handle_get_exchange_info(api, parse_args(tool, args)?).await,
    }
}

fn parse_args<P: DeserializeOwned>(tool: ToolName, args: Map<String, Value>) -> Result<P> {
    serde_json::from_value(Value::Object(args)).map_err(|e| {
        ProviderError::InvalidArgument(format!("invalid arguments for {}: {}", tool, e))
    })
}

// ========== Market Data Tool Handlers ==========

async fn handle_get_crypto_price(api: &dyn MarketDataApi, params: SymbolParams) -> Result<Value> {
    let symbol = Symbol::parse(&params.symbol)?;
    tracing::info!(symbol = %symbol, "getting price");

    let quote = api.get_price(&symbol).await?;
    Ok(serde_json::to_value(&quote)?)
}

async fn handle_get_market_stats(api: &dyn MarketDataApi, params: SymbolParams) -> Result<Value> {
    let symbol = Symbol::parse(&params.symbol)?;
    tracing::info!(symbol = %symbol, "getting 24h market stats");

    let ticker = api
        .get_ticker_24h(Some(&symbol))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::NotFound(format!("no 24h statistics for {}", symbol)))?;

    let trend = aggregate::trend(&ticker);
    Ok(serde_json::to_value(&MarketStats { ticker, trend })?)
}

async fn handle_get_top_cryptocurrencies(
    api: &dyn MarketDataApi,
    params: TopCryptocurrenciesParams,
) -> Result<Value> {
    let limit = LimitRange::TOP_SYMBOLS.resolve("limit", params.limit)?;
    let quote_asset = validate::quote_asset(params.quote_asset.as_deref())?;
    tracing::info!(limit, quote_asset = %quote_asset, "getting top cryptocurrencies");

    let tickers = api.get_ticker_24h(None).await?;
    let top = top_by_volume(&tickers, &quote_asset, limit as usize);

    Ok(json!({
        "quote_asset": quote_asset,
        "count": top.len(),
        "symbols": top,
    }))
}

async fn handle_get_order_book(api: &dyn MarketDataApi, params: OrderBookParams) -> Result<Value> {
    let symbol = Symbol::parse(&params.symbol)?;
    let limit = DepthLimit::resolve(params.limit)?;
    tracing::info!(symbol = %symbol, limit = limit.get(), "getting order book");

    let book = api.get_order_book(&symbol, limit).await?;
    let summary = order_book_summary(&book)?;

    Ok(serde_json::to_value(&OrderBookView { book, summary })?)
}

async fn handle_get_candlestick_data(
    api: &dyn MarketDataApi,
    params: CandlestickParams,
) -> Result<Value> {
    let symbol = Symbol::parse(&params.symbol)?;
    let interval = KlineInterval::resolve(params.interval.as_deref())?;
    let limit = LimitRange::KLINES.resolve("limit", params.limit)?;
    tracing::info!(symbol = %symbol, interval = %interval, limit, "getting klines");

    let klines = api.get_klines(&symbol, interval, limit).await?;
    // A symbol with no candles in range yields data without a summary
    let summary = if klines.is_empty() {
        None
    } else {
        Some(KlineSummary::from_klines(&klines)?)
    };

    Ok(json!({
        "symbol": symbol,
        "interval": interval,
        "count": klines.len(),
        "klines": klines,
        "summary": summary,
    }))
}

async fn handle_get_trades(
    api: &dyn MarketDataApi,
    params: TradesParams,
    historical: bool,
) -> Result<Value> {
    let symbol = Symbol::parse(&params.symbol)?;
    let limit = LimitRange::TRADES.resolve("limit", params.limit)?;
    tracing::info!(symbol = %symbol, limit, historical, "getting trades");

    let trades = if historical {
        api.get_historical_trades(&symbol, limit).await?
    } else {
        api.get_recent_trades(&symbol, limit).await?
    };

    Ok(json!({
        "symbol": symbol,
        "count": trades.len(),
        "trades": trades,
    }))
}

async fn handle_get_exchange_info(
    api: &dyn MarketDataApi,
    params: ExchangeInfoParams,
) -> Result<Value> {
    match params.symbol {
        Some(raw) => {
            let symbol = Symbol::parse(&raw)?;
            tracing::info!(symbol = %symbol, "getting exchange info");

            let info = api.get_exchange_info(Some(&symbol)).await?;
            Ok(serde_json::to_value(symbol_detail(&info, symbol.as_str())?)?)
        }
        None => {
            tracing::info!("getting exchange summary");

            let info = api.get_exchange_info(None).await?;
            Ok(serde_json::to_value(exchange_summary(
                &info,
                validate::DEFAULT_QUOTE_ASSET,
            ))?)
        }
    }
}

// ========== Account Tool Handlers ==========

async fn handle_get_account_balance(api: &dyn MarketDataApi) -> Result<Value> {
    tracing::info!("getting account balance");

    let balances = non_zero_balances(&api.get_account_balance().await?)?;
    Ok(json!({
        "count": balances.len(),
        "balances": balances,
    }))
}
