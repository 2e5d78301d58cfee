//! Top-N rankings over a bulk 24h ticker snapshot
//!
//! Every ranking first keeps only symbols ending in the quote asset
//! (case-sensitive suffix match), then drops tickers whose ranking key does
//! not parse as a decimal.

use super::parse_decimal;
use crate::binance::Ticker24hr;
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;

/// One row of a ranking; upstream fields are passed through verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedTicker {
    /// 1-based position
    pub rank: usize,
    pub symbol: String,
    /// Symbol with the quote asset suffix removed
    pub base_asset: String,
    pub last_price: String,
    pub price_change: String,
    pub price_change_percent: String,
    pub volume: String,
    pub quote_volume: String,
    pub high_price: String,
    pub low_price: String,
}

impl RankedTicker {
    fn new(rank: usize, ticker: &Ticker24hr, quote_asset: &str) -> Self {
        Self {
            rank,
            symbol: ticker.symbol.clone(),
            base_asset: ticker
                .symbol
                .strip_suffix(quote_asset)
                .unwrap_or(&ticker.symbol)
                .to_string(),
            last_price: ticker.last_price.clone(),
            price_change: ticker.price_change.clone(),
            price_change_percent: ticker.price_change_percent.clone(),
            volume: ticker.volume.clone(),
            quote_volume: ticker.quote_volume.clone(),
            high_price: ticker.high_price.clone(),
            low_price: ticker.low_price.clone(),
        }
    }
}

type Keyed<'a> = (Decimal, &'a Ticker24hr);

fn keyed<'a>(
    tickers: &'a [Ticker24hr],
    quote_asset: &str,
    key: impl Fn(&Ticker24hr) -> &str,
) -> Vec<Keyed<'a>> {
    tickers
        .iter()
        .filter(|t| t.symbol.len() > quote_asset.len() && t.symbol.ends_with(quote_asset))
        .filter_map(|t| parse_decimal(key(t)).map(|value| (value, t)))
        .collect()
}

fn into_ranked(entries: Vec<Keyed<'_>>, quote_asset: &str) -> Vec<RankedTicker> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, (_, ticker))| RankedTicker::new(i + 1, ticker, quote_asset))
        .collect()
}

/// Value descending, symbol ascending on ties
fn descending(a: &Keyed<'_>, b: &Keyed<'_>) -> Ordering {
    b.0.cmp(&a.0).then_with(|| a.1.symbol.cmp(&b.1.symbol))
}

/// Full ranking by base-asset `volume`
pub fn rank_by_volume(tickers: &[Ticker24hr], quote_asset: &str) -> Vec<RankedTicker> {
    let mut entries = keyed(tickers, quote_asset, |t| &t.volume);
    entries.sort_by(descending);
    into_ranked(entries, quote_asset)
}

/// Full ranking by `priceChangePercent`, largest gain first
pub fn rank_gainers(tickers: &[Ticker24hr], quote_asset: &str) -> Vec<RankedTicker> {
    let mut entries = keyed(tickers, quote_asset, |t| &t.price_change_percent);
    entries.sort_by(descending);
    into_ranked(entries, quote_asset)
}

/// Full ranking by `priceChangePercent`, largest loss first
///
/// Uses the exact reverse of the gainers ordering.
pub fn rank_losers(tickers: &[Ticker24hr], quote_asset: &str) -> Vec<RankedTicker> {
    let mut entries = keyed(tickers, quote_asset, |t| &t.price_change_percent);
    entries.sort_by(|a, b| descending(b, a));
    into_ranked(entries, quote_asset)
}

pub fn top_by_volume(tickers: &[Ticker24hr], quote_asset: &str, n: usize) -> Vec<RankedTicker> {
    truncated(rank_by_volume(tickers, quote_asset), n)
}

pub fn top_gainers(tickers: &[Ticker24hr], quote_asset: &str, n: usize) -> Vec<RankedTicker> {
    truncated(rank_gainers(tickers, quote_asset), n)
}

pub fn top_losers(tickers: &[Ticker24hr], quote_asset: &str, n: usize) -> Vec<RankedTicker> {
    truncated(rank_losers(tickers, quote_asset), n)
}

fn truncated(mut rows: Vec<RankedTicker>, n: usize) -> Vec<RankedTicker> {
    rows.truncate(n);
    rows
}
