//! Request validation
//!
//! Pure normalization and bounds checks applied to tool/resource arguments
//! before any call reaches the Binance client. Out-of-range values are
//! rejected, never clamped, and the error names the valid range or set.

use crate::error::{ProviderError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;

const SYMBOL_MIN_LEN: usize = 2;
const SYMBOL_MAX_LEN: usize = 20;

/// Normalized trading pair identifier (e.g. `BTCUSDT`)
///
/// Only constructible through [`Symbol::parse`]. Existence on the exchange is
/// not checked locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    /// Trims, uppercases and checks the exchange symbol charset
    pub fn parse(raw: &str) -> Result<Self> {
        let symbol = raw.trim().to_ascii_uppercase();

        if symbol.is_empty() {
            return Err(ProviderError::InvalidArgument(
                "symbol must not be empty".to_string(),
            ));
        }
        if !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ProviderError::InvalidArgument(format!(
                "symbol must contain only letters and digits, got {:?}",
                raw.trim()
            )));
        }
        if !(SYMBOL_MIN_LEN..=SYMBOL_MAX_LEN).contains(&symbol.len()) {
            return Err(ProviderError::InvalidArgument(format!(
                "symbol must be between {} and {} characters, got {:?}",
                SYMBOL_MIN_LEN, SYMBOL_MAX_LEN, symbol
            )));
        }

        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Inclusive numeric bounds for an endpoint's `limit` argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl LimitRange {
    /// `limit` of `get_top_cryptocurrencies`
    pub const TOP_SYMBOLS: LimitRange = LimitRange {
        min: 1,
        max: 50,
        default: 10,
    };

    /// `limit` of `get_candlestick_data`
    pub const KLINES: LimitRange = LimitRange {
        min: 1,
        max: 1000,
        default: 100,
    };

    /// `limit` of the recent/historical trades tools
    pub const TRADES: LimitRange = LimitRange {
        min: 1,
        max: 1000,
        default: 500,
    };

    /// Applies the default when absent and checks the bounds otherwise
    pub fn resolve(&self, name: &str, value: Option<i64>) -> Result<u32> {
        let Some(value) = value else {
            return Ok(self.default);
        };

        if value < i64::from(self.min) || value > i64::from(self.max) {
            return Err(ProviderError::InvalidArgument(format!(
                "{} must be between {} and {}, got {}",
                name, self.min, self.max, value
            )));
        }

        // Bounds checked above
        Ok(value as u32)
    }
}

/// Order book depths accepted by `/api/v3/depth`
pub const DEPTH_LIMITS: [u32; 8] = [5, 10, 20, 50, 100, 500, 1000, 5000];

/// Order book depth restricted to [`DEPTH_LIMITS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthLimit(u32);

impl DepthLimit {
    pub const DEFAULT: DepthLimit = DepthLimit(20);

    pub fn resolve(value: Option<i64>) -> Result<Self> {
        let Some(value) = value else {
            return Ok(Self::DEFAULT);
        };

        DEPTH_LIMITS
            .iter()
            .copied()
            .find(|allowed| i64::from(*allowed) == value)
            .map(DepthLimit)
            .ok_or_else(|| {
                let allowed: Vec<String> = DEPTH_LIMITS.iter().map(|l| l.to_string()).collect();
                ProviderError::InvalidArgument(format!(
                    "limit must be one of {}, got {}",
                    allowed.join(", "),
                    value
                ))
            })
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for DepthLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Kline intervals supported by `/api/v3/klines`
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
pub enum KlineInterval {
    #[strum(to_string = "1s")]
    OneSecond,
    #[strum(to_string = "1m")]
    OneMinute,
    #[strum(to_string = "3m")]
    ThreeMinutes,
    #[strum(to_string = "5m")]
    FiveMinutes,
    #[strum(to_string = "15m")]
    FifteenMinutes,
    #[strum(to_string = "30m")]
    ThirtyMinutes,
    #[default]
    #[strum(to_string = "1h")]
    OneHour,
    #[strum(to_string = "2h")]
    TwoHours,
    #[strum(to_string = "4h")]
    FourHours,
    #[strum(to_string = "6h")]
    SixHours,
    #[strum(to_string = "8h")]
    EightHours,
    #[strum(to_string = "12h")]
    TwelveHours,
    #[strum(to_string = "1d")]
    OneDay,
    #[strum(to_string = "3d")]
    ThreeDays,
    #[strum(to_string = "1w")]
    OneWeek,
    #[strum(to_string = "1M")]
    OneMonth,
}

impl KlineInterval {
    /// Parses an interval code; case matters (`1m` is a minute, `1M` a month)
    pub fn resolve(value: Option<&str>) -> Result<Self> {
        let Some(raw) = value else {
            return Ok(Self::default());
        };

        KlineInterval::from_str(raw.trim()).map_err(|_| {
            ProviderError::InvalidArgument(format!(
                "interval must be one of {}, got {:?}",
                Self::codes().join(", "),
                raw
            ))
        })
    }

    pub fn codes() -> Vec<&'static str> {
        KlineInterval::iter().map(<&'static str>::from).collect()
    }

}

impl Serialize for KlineInterval {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

/// Quote assets accepted by the ranking tools
pub const QUOTE_ASSETS: [&str; 12] = [
    "USDT", "USDC", "FDUSD", "BUSD", "TUSD", "DAI", "BTC", "ETH", "BNB", "EUR", "TRY", "BRL",
];

/// Default quote asset for rankings and market resources
pub const DEFAULT_QUOTE_ASSET: &str = "USDT";

/// Uppercases a quote asset filter and checks it against [`QUOTE_ASSETS`]
pub fn quote_asset(value: Option<&str>) -> Result<String> {
    let Some(raw) = value else {
        return Ok(DEFAULT_QUOTE_ASSET.to_string());
    };

    let asset = raw.trim().to_ascii_uppercase();
    if QUOTE_ASSETS.contains(&asset.as_str()) {
        Ok(asset)
    } else {
        Err(ProviderError::InvalidArgument(format!(
            "quote_asset must be one of {}, got {:?}",
            QUOTE_ASSETS.join(", "),
            raw
        )))
    }
}
