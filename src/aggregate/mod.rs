//! Aggregation layer
//!
//! Pure functions deriving composite views from data the client already
//! fetched. All arithmetic on upstream decimal strings goes through
//! `rust_decimal`; rounding happens only when a summary is built for display.

pub mod account;
pub mod depth;
pub mod exchange;
pub mod klines;
pub mod market;
pub mod ranking;

pub use account::{non_zero_balances, BalanceRow};
pub use depth::{order_book_summary, OrderBookSummary, Pressure};
pub use exchange::{
    exchange_overview, exchange_summary, symbol_detail, ExchangeOverview, ExchangeSummary,
    SymbolBrief, SymbolDetail,
};
pub use klines::KlineSummary;
pub use market::{market_overview, trend, MarketOverview, Sentiment, Trend};
pub use ranking::{
    rank_by_volume, rank_gainers, rank_losers, top_by_volume, top_gainers, top_losers,
    RankedTicker,
};

use rust_decimal::Decimal;
use std::str::FromStr;

/// Decimal places kept for prices and volumes in summaries
pub const PRICE_DP: u32 = 8;

/// Decimal places kept for percentages and ratios in summaries
pub const PERCENT_DP: u32 = 4;

/// Parses an upstream decimal string, `None` when malformed
pub(crate) fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim()).ok()
}
