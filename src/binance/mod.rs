//! Binance API Client
//!
//! This module contains the market data client contract and its HTTP implementation.

pub mod api;
pub mod client;
pub mod types;

// Re-export commonly used types
pub use api::MarketDataApi;
pub use client::BinanceClient;
pub use types::{
    Balance, ExchangeInfo, Kline, OrderBookSnapshot, PriceLevel, PriceQuote, SymbolInfo,
    Ticker24hr, Trade,
};
