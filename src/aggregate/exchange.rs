//! Condensed views of `/api/v3/exchangeInfo`

use crate::binance::{ExchangeInfo, SymbolInfo};
use crate::error::{ProviderError, Result};
use serde::Serialize;
use serde_json::Value;

const TRADING: &str = "TRADING";

/// Trading pairs sampled into the exchange summary
const SUMMARY_SAMPLE: usize = 10;

/// Symbols listed by the exchange overview
const OVERVIEW_SYMBOLS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolBrief {
    pub symbol: String,
    pub status: String,
    pub base_asset: String,
    pub quote_asset: String,
}

impl From<&SymbolInfo> for SymbolBrief {
    fn from(info: &SymbolInfo) -> Self {
        Self {
            symbol: info.symbol.clone(),
            status: info.status.clone(),
            base_asset: info.base_asset.clone(),
            quote_asset: info.quote_asset.clone(),
        }
    }
}

/// Trading rules for one symbol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolDetail {
    pub symbol: String,
    pub status: String,
    pub base_asset: String,
    pub quote_asset: String,
    pub is_spot_trading_allowed: bool,
    pub is_margin_trading_allowed: bool,
    pub filters: Vec<Value>,
}

pub fn symbol_detail(info: &ExchangeInfo, symbol: &str) -> Result<SymbolDetail> {
    let found = info
        .symbols
        .iter()
        .find(|s| s.symbol == symbol)
        .ok_or_else(|| ProviderError::NotFound(format!("symbol {} not listed on the exchange", symbol)))?;

    Ok(SymbolDetail {
        symbol: found.symbol.clone(),
        status: found.status.clone(),
        base_asset: found.base_asset.clone(),
        quote_asset: found.quote_asset.clone(),
        is_spot_trading_allowed: found.is_spot_trading_allowed,
        is_margin_trading_allowed: found.is_margin_trading_allowed,
        filters: found.filters.clone(),
    })
}

/// Exchange-wide counts plus a sample of trading pairs in `quote_asset`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeSummary {
    pub timezone: String,
    pub server_time: i64,
    pub rate_limit_count: usize,
    pub exchange_filter_count: usize,
    pub total_symbols: usize,
    pub trading_symbols: usize,
    pub sample_pairs: Vec<SymbolBrief>,
}

pub fn exchange_summary(info: &ExchangeInfo, quote_asset: &str) -> ExchangeSummary {
    let trading = info.symbols.iter().filter(|s| s.status == TRADING);

    ExchangeSummary {
        timezone: info.timezone.clone(),
        server_time: info.server_time,
        rate_limit_count: info.rate_limits.len(),
        exchange_filter_count: info.exchange_filters.len(),
        total_symbols: info.symbols.len(),
        trading_symbols: trading.clone().count(),
        sample_pairs: trading
            .filter(|s| s.quote_asset == quote_asset)
            .take(SUMMARY_SAMPLE)
            .map(SymbolBrief::from)
            .collect(),
    }
}

/// Body of the `exchange/info` resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeOverview {
    pub timezone: String,
    pub server_time: i64,
    pub rate_limits: Vec<Value>,
    pub exchange_filters: Vec<Value>,
    pub symbol_count: usize,
    pub symbols: Vec<SymbolBrief>,
}

pub fn exchange_overview(info: &ExchangeInfo) -> ExchangeOverview {
    ExchangeOverview {
        timezone: info.timezone.clone(),
        server_time: info.server_time,
        rate_limits: info.rate_limits.clone(),
        exchange_filters: info.exchange_filters.clone(),
        symbol_count: info.symbols.len(),
        symbols: info
            .symbols
            .iter()
            .take(OVERVIEW_SYMBOLS)
            .map(SymbolBrief::from)
            .collect(),
    }
}
