//! Tool and resource dispatch against a call-counting stub client

use async_trait::async_trait;
use binance_context_server::binance::{
    Balance, ExchangeInfo, Kline, MarketDataApi, OrderBookSnapshot, PriceQuote, SymbolInfo,
    Ticker24hr, Trade,
};
use binance_context_server::error::{ErrorKind, ProviderError, Result};
use binance_context_server::provider::BinanceProvider;
use binance_context_server::validate::{DepthLimit, KlineInterval, Symbol};
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct StubApi {
    calls: AtomicUsize,
    tickers: Vec<Ticker24hr>,
    book: Option<OrderBookSnapshot>,
    klines: Vec<Kline>,
    balances: Option<Vec<Balance>>,
    exchange: ExchangeInfo,
}

impl StubApi {
    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataApi for StubApi {
    async fn get_price(&self, symbol: &Symbol) -> Result<PriceQuote> {
        self.hit();
        if symbol.as_str() == "NOPEUSDT" {
            return Err(ProviderError::NotFound("Invalid symbol.".to_string()));
        }
        Ok(PriceQuote {
            symbol: symbol.to_string(),
            price: Decimal::from_str("67012.34").unwrap(),
        })
    }

    async fn get_ticker_24h(&self, symbol: Option<&Symbol>) -> Result<Vec<Ticker24hr>> {
        self.hit();
        Ok(match symbol {
            Some(s) => self
                .tickers
                .iter()
                .filter(|t| t.symbol == s.as_str())
                .cloned()
                .collect(),
            None => self.tickers.clone(),
        })
    }

    async fn get_order_book(&self, _symbol: &Symbol, _limit: DepthLimit) -> Result<OrderBookSnapshot> {
        self.hit();
        self.book
            .clone()
            .ok_or_else(|| ProviderError::upstream(Some(503), "unavailable"))
    }

    async fn get_klines(
        &self,
        _symbol: &Symbol,
        _interval: KlineInterval,
        _limit: u32,
    ) -> Result<Vec<Kline>> {
        self.hit();
        Ok(self.klines.clone())
    }

    async fn get_recent_trades(&self, _symbol: &Symbol, limit: u32) -> Result<Vec<Trade>> {
        self.hit();
        Ok((0..limit.min(3) as i64).map(trade).collect())
    }

    async fn get_historical_trades(&self, _symbol: &Symbol, limit: u32) -> Result<Vec<Trade>> {
        self.hit();
        Ok((100..100 + limit.min(2) as i64).map(trade).collect())
    }

    async fn get_account_balance(&self) -> Result<Vec<Balance>> {
        // Mirrors the real client: no credentials, no request
        let balances = self.balances.clone().ok_or_else(|| {
            ProviderError::Unauthorized("API credentials not configured".to_string())
        })?;
        self.hit();
        Ok(balances)
    }

    async fn get_exchange_info(&self, symbol: Option<&Symbol>) -> Result<ExchangeInfo> {
        self.hit();
        let mut info = self.exchange.clone();
        if let Some(s) = symbol {
            info.symbols.retain(|i| i.symbol == s.as_str());
        }
        Ok(info)
    }
}

fn trade(id: i64) -> Trade {
    Trade {
        id,
        price: "100.0".to_string(),
        qty: "1.0".to_string(),
        quote_qty: "100.0".to_string(),
        time: 1_700_000_000_000 + id,
        is_buyer_maker: id % 2 == 0,
        is_best_match: true,
    }
}

fn ticker(symbol: &str, volume: &str, change: &str) -> Ticker24hr {
    Ticker24hr {
        symbol: symbol.to_string(),
        volume: volume.to_string(),
        quote_volume: volume.to_string(),
        price_change_percent: change.to_string(),
        last_price: "1.0".to_string(),
        ..Default::default()
    }
}

fn three_tickers() -> Vec<Ticker24hr> {
    vec![
        ticker("AAAUSDT", "100", "5"),
        ticker("BBBUSDT", "50", "-3"),
        ticker("CCCBTC", "200", "10"),
    ]
}

fn kline(open_time: i64, close: &str, volume: &str) -> Kline {
    let close = Decimal::from_str(close).unwrap();
    Kline {
        open_time,
        open: close,
        high: close + Decimal::ONE,
        low: close - Decimal::ONE,
        close,
        volume: Decimal::from_str(volume).unwrap(),
        close_time: open_time + 3_599_999,
        quote_volume: Decimal::ZERO,
        trades: 10,
    }
}

fn provider(stub: StubApi) -> (BinanceProvider, Arc<StubApi>) {
    let stub = Arc::new(stub);
    (BinanceProvider::new(stub.clone()), stub)
}

/// Decimal fields serialize as strings; compare them numerically
fn dec(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().unwrap()).unwrap()
}

fn args(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("arguments must be an object"),
    }
}

#[tokio::test]
async fn test_top_cryptocurrencies_scenario() {
    let (provider, stub) = provider(StubApi {
        tickers: three_tickers(),
        ..Default::default()
    });

    let result = provider
        .call_tool("get_top_cryptocurrencies", args(json!({"limit": 2})))
        .await
        .unwrap();

    let symbols: Vec<&str> = result["symbols"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["symbol"].as_str().unwrap())
        .collect();
    assert_eq!(symbols, vec!["AAAUSDT", "BBBUSDT"]);
    assert_eq!(result["quote_asset"], "USDT");
    assert_eq!(result["count"], 2);
    assert_eq!(result["symbols"][0]["rank"], 1);
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_order_book_scenario_returns_levels_unmodified() {
    let bids: Vec<(String, String)> = (0..10)
        .map(|i| (format!("{}.00", 100 - i), format!("{}.5", i + 1)))
        .collect();
    let asks: Vec<(String, String)> = (0..10)
        .map(|i| (format!("{}.00", 101 + i), format!("{}.25", i + 1)))
        .collect();
    let (provider, stub) = provider(StubApi {
        book: Some(OrderBookSnapshot {
            symbol: "BTCUSDT".to_string(),
            last_update_id: 42,
            bids: bids.clone(),
            asks: asks.clone(),
        }),
        ..Default::default()
    });

    let result = provider
        .call_tool("get_order_book", args(json!({"symbol": "BTCUSDT", "limit": 10})))
        .await
        .unwrap();

    assert_eq!(result["bids"], serde_json::to_value(&bids).unwrap());
    assert_eq!(result["asks"], serde_json::to_value(&asks).unwrap());
    assert_eq!(dec(&result["summary"]["best_bid"]), Decimal::from(100));
    assert_eq!(dec(&result["summary"]["spread"]), Decimal::ONE);
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_invalid_arguments_never_reach_the_client() {
    let (provider, stub) = provider(StubApi {
        tickers: three_tickers(),
        ..Default::default()
    });

    let cases = [
        ("get_top_cryptocurrencies", json!({"limit": 0})),
        ("get_top_cryptocurrencies", json!({"limit": 51})),
        ("get_top_cryptocurrencies", json!({"quote_asset": "DOGE"})),
        ("get_order_book", json!({"symbol": "BTCUSDT", "limit": 7})),
        ("get_order_book", json!({"symbol": "BTCUSDT", "limit": -5})),
        ("get_candlestick_data", json!({"symbol": "BTCUSDT", "interval": "2m"})),
        ("get_candlestick_data", json!({"symbol": "BTCUSDT", "limit": 1001})),
        ("get_recent_trades", json!({"symbol": "BTCUSDT", "limit": 0})),
        ("get_historical_trades", json!({"symbol": "BTCUSDT", "limit": 5000})),
        ("get_crypto_price", json!({"symbol": "   "})),
        ("get_crypto_price", json!({"symbol": "BTC-USDT"})),
        ("get_crypto_price", json!({})),
        ("get_market_stats", json!({"symbol": 42})),
        ("get_exchange_info", json!({"symbol": "B"})),
    ];

    for (tool, arguments) in cases {
        let err = provider
            .call_tool(tool, args(arguments.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{} {}", tool, arguments);
    }

    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_range_error_names_valid_range() {
    let (provider, _) = provider(StubApi::default());

    let err = provider
        .call_tool("get_top_cryptocurrencies", args(json!({"limit": 100})))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("between 1 and 50"));

    let err = provider
        .call_tool("get_order_book", args(json!({"symbol": "BTCUSDT", "limit": 7})))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("5000"));
}

#[tokio::test]
async fn test_account_balance_without_credentials() {
    let (provider, stub) = provider(StubApi::default());

    let err = provider
        .call_tool("get_account_balance", Map::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_account_balance_filters_zero() {
    let (provider, _) = provider(StubApi {
        balances: Some(vec![
            Balance {
                asset: "BTC".to_string(),
                free: "0.5".to_string(),
                locked: "0.1".to_string(),
            },
            Balance {
                asset: "LTC".to_string(),
                free: "0.00000000".to_string(),
                locked: "0.00000000".to_string(),
            },
        ]),
        ..Default::default()
    });

    let result = provider
        .call_tool("get_account_balance", Map::new())
        .await
        .unwrap();

    assert_eq!(result["count"], 1);
    assert_eq!(result["balances"][0]["asset"], "BTC");
    assert_eq!(dec(&result["balances"][0]["total"]), Decimal::from_str("0.6").unwrap());
}

#[tokio::test]
async fn test_account_balance_with_malformed_amount() {
    let (provider, _) = provider(StubApi {
        balances: Some(vec![Balance {
            asset: "BTC".to_string(),
            free: "not-a-number".to_string(),
            locked: "0".to_string(),
        }]),
        ..Default::default()
    });

    let err = provider
        .call_tool("get_account_balance", Map::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InternalError);
}

#[tokio::test]
async fn test_unknown_tool_and_resource() {
    let (provider, stub) = provider(StubApi::default());

    let err = provider.call_tool("place_order", Map::new()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = provider
        .read_resource("binance://account/orders")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_crypto_price_normalizes_symbol() {
    let (provider, _) = provider(StubApi::default());

    let result = provider
        .call_tool("get_crypto_price", args(json!({"symbol": " btcusdt "})))
        .await
        .unwrap();

    assert_eq!(result["symbol"], "BTCUSDT");
    assert_eq!(dec(&result["price"]), Decimal::from_str("67012.34").unwrap());

    let err = provider
        .call_tool("get_crypto_price", args(json!({"symbol": "NOPEUSDT"})))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_market_stats_includes_trend() {
    let (provider, _) = provider(StubApi {
        tickers: three_tickers(),
        ..Default::default()
    });

    let result = provider
        .call_tool("get_market_stats", args(json!({"symbol": "bbbusdt"})))
        .await
        .unwrap();

    assert_eq!(result["symbol"], "BBBUSDT");
    assert_eq!(result["priceChangePercent"], "-3");
    assert_eq!(result["trend"], "down");
}

#[tokio::test]
async fn test_candlestick_data_with_summary() {
    let (provider, _) = provider(StubApi {
        klines: vec![
            kline(0, "100", "10"),
            kline(3_600_000, "110", "30"),
            kline(7_200_000, "120", "20"),
        ],
        ..Default::default()
    });

    let result = provider
        .call_tool(
            "get_candlestick_data",
            args(json!({"symbol": "BTCUSDT", "interval": "4h", "limit": 3})),
        )
        .await
        .unwrap();

    assert_eq!(result["interval"], "4h");
    assert_eq!(result["count"], 3);
    assert_eq!(dec(&result["summary"]["max_close"]), Decimal::from(120));
    assert_eq!(dec(&result["summary"]["min_close"]), Decimal::from(100));
    assert_eq!(dec(&result["summary"]["mean_close"]), Decimal::from(110));
    assert_eq!(dec(&result["summary"]["mean_volume"]), Decimal::from(20));
    assert_eq!(dec(&result["summary"]["percent_change"]), Decimal::from(20));
}

#[tokio::test]
async fn test_candlestick_data_without_candles() {
    let (provider, _) = provider(StubApi::default());

    let result = provider
        .call_tool("get_candlestick_data", args(json!({"symbol": "BTCUSDT"})))
        .await
        .unwrap();

    assert_eq!(result["count"], 0);
    assert!(result["summary"].is_null());
}

#[tokio::test]
async fn test_trade_tools() {
    let (provider, stub) = provider(StubApi::default());

    let recent = provider
        .call_tool("get_recent_trades", args(json!({"symbol": "BTCUSDT"})))
        .await
        .unwrap();
    assert_eq!(recent["count"], 3);
    assert_eq!(recent["trades"][0]["id"], 0);

    let historical = provider
        .call_tool("get_historical_trades", args(json!({"symbol": "BTCUSDT", "limit": 2})))
        .await
        .unwrap();
    assert_eq!(historical["count"], 2);
    assert_eq!(historical["trades"][0]["id"], 100);

    assert_eq!(stub.calls(), 2);
}

fn exchange() -> ExchangeInfo {
    let symbol = |name: &str, base: &str, quote: &str, status: &str| SymbolInfo {
        symbol: name.to_string(),
        status: status.to_string(),
        base_asset: base.to_string(),
        quote_asset: quote.to_string(),
        is_spot_trading_allowed: true,
        ..Default::default()
    };
    ExchangeInfo {
        timezone: "UTC".to_string(),
        server_time: 1_700_000_000_000,
        rate_limits: vec![json!({"rateLimitType": "REQUEST_WEIGHT"})],
        exchange_filters: vec![],
        symbols: vec![
            symbol("BTCUSDT", "BTC", "USDT", "TRADING"),
            symbol("ETHBTC", "ETH", "BTC", "TRADING"),
            symbol("OLDUSDT", "OLD", "USDT", "BREAK"),
        ],
    }
}

#[tokio::test]
async fn test_exchange_info_tool() {
    let (provider, _) = provider(StubApi {
        exchange: exchange(),
        ..Default::default()
    });

    let detail = provider
        .call_tool("get_exchange_info", args(json!({"symbol": "ethbtc"})))
        .await
        .unwrap();
    assert_eq!(detail["base_asset"], "ETH");
    assert_eq!(detail["is_spot_trading_allowed"], true);

    let summary = provider
        .call_tool("get_exchange_info", Map::new())
        .await
        .unwrap();
    assert_eq!(summary["total_symbols"], 3);
    assert_eq!(summary["trading_symbols"], 2);
    assert_eq!(summary["sample_pairs"][0]["symbol"], "BTCUSDT");
    assert_eq!(summary["sample_pairs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_market_resources() {
    let (provider, stub) = provider(StubApi {
        tickers: three_tickers(),
        ..Default::default()
    });

    let overview = provider
        .read_resource("binance://market/overview")
        .await
        .unwrap();
    assert_eq!(overview["total_symbols"], 2);
    assert_eq!(overview["positive_count"], 1);
    assert_eq!(overview["negative_count"], 1);
    assert_eq!(overview["sentiment"], "neutral");
    assert!(overview["timestamp"].is_string());

    let gainers = provider
        .read_resource("binance://market/top-gainers")
        .await
        .unwrap();
    assert_eq!(gainers["gainers"][0]["symbol"], "AAAUSDT");

    let losers = provider
        .read_resource("binance://market/top-losers")
        .await
        .unwrap();
    assert_eq!(losers["losers"][0]["symbol"], "BBBUSDT");

    let leaders = provider
        .read_resource("binance://market/volume-leaders")
        .await
        .unwrap();
    assert_eq!(leaders["count"], 2);
    assert_eq!(leaders["volume_leaders"][0]["symbol"], "AAAUSDT");

    // One bulk ticker fetch per read
    assert_eq!(stub.calls(), 4);
}

#[tokio::test]
async fn test_exchange_info_resource() {
    let (provider, _) = provider(StubApi {
        exchange: exchange(),
        ..Default::default()
    });

    let info = provider
        .read_resource("binance://exchange/info")
        .await
        .unwrap();

    assert_eq!(info["timezone"], "UTC");
    assert_eq!(info["symbol_count"], 3);
    assert_eq!(info["symbols"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_upstream_failure_surfaces_with_status() {
    let (provider, _) = provider(StubApi::default());

    let err = provider
        .call_tool("get_order_book", args(json!({"symbol": "BTCUSDT"})))
        .await
        .unwrap_err();

    assert_eq!(err.envelope().kind, ErrorKind::UpstreamError);
    assert_eq!(err.envelope().status, Some(503));
}
