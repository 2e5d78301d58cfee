//! Market-wide views over a bulk 24h ticker snapshot

use super::ranking::{top_by_volume, RankedTicker};
use super::{parse_decimal, PRICE_DP};
use crate::binance::Ticker24hr;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Direction of a single ticker's 24h move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
    /// `priceChangePercent` did not parse
    Unknown,
}

pub fn trend(ticker: &Ticker24hr) -> Trend {
    match parse_decimal(&ticker.price_change_percent) {
        Some(p) if p.is_sign_positive() && !p.is_zero() => Trend::Up,
        Some(p) if p.is_zero() => Trend::Flat,
        Some(_) => Trend::Down,
        None => Trend::Unknown,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketOverview {
    pub timestamp: DateTime<Utc>,
    pub quote_asset: String,
    pub total_symbols: usize,
    /// Sum of parseable 24h quote volumes
    pub total_quote_volume: Decimal,
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub sentiment: Sentiment,
    pub top_by_volume: Vec<RankedTicker>,
}

/// Overview of every pair quoted in `quote_asset`
pub fn market_overview(
    tickers: &[Ticker24hr],
    quote_asset: &str,
    top_n: usize,
    timestamp: DateTime<Utc>,
) -> MarketOverview {
    let quoted: Vec<&Ticker24hr> = tickers
        .iter()
        .filter(|t| t.symbol.len() > quote_asset.len() && t.symbol.ends_with(quote_asset))
        .collect();

    let total_quote_volume = quoted
        .iter()
        .filter_map(|t| parse_decimal(&t.quote_volume))
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
        .round_dp(PRICE_DP);

    let positive_count = quoted.iter().filter(|t| trend(t) == Trend::Up).count();
    let negative_count = quoted.iter().filter(|t| trend(t) == Trend::Down).count();
    let neutral_count = quoted.len() - positive_count - negative_count;

    let sentiment = if positive_count > negative_count {
        Sentiment::Bullish
    } else if negative_count > positive_count {
        Sentiment::Bearish
    } else {
        Sentiment::Neutral
    };

    MarketOverview {
        timestamp,
        quote_asset: quote_asset.to_string(),
        total_symbols: quoted.len(),
        total_quote_volume,
        positive_count,
        negative_count,
        neutral_count,
        sentiment,
        top_by_volume: top_by_volume(tickers, quote_asset, top_n),
    }
}
