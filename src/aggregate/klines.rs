//! Summary statistics over a chronological kline window

use super::{PERCENT_DP, PRICE_DP};
use crate::binance::Kline;
use crate::error::{ProviderError, Result};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KlineSummary {
    pub count: usize,
    pub first_open_time: i64,
    pub last_close_time: i64,
    pub first_close: Decimal,
    pub last_close: Decimal,
    pub max_close: Decimal,
    pub min_close: Decimal,
    pub mean_close: Decimal,
    pub mean_volume: Decimal,
    /// (last - first) / first * 100
    pub percent_change: Decimal,
    pub highest_high: Decimal,
    pub lowest_low: Decimal,
    /// Last candle volume over the window's mean volume
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_ratio: Option<Decimal>,
    /// Where the last close sits between lowest low (0) and highest high (100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_position_percent: Option<Decimal>,
}

impl KlineSummary {
    /// Fails with `InvalidArgument` on an empty window
    pub fn from_klines(klines: &[Kline]) -> Result<Self> {
        let (first, last) = match (klines.first(), klines.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(ProviderError::InvalidArgument(
                    "cannot summarize an empty kline sequence".to_string(),
                ))
            }
        };

        let count = Decimal::from(klines.len());
        let close_sum = checked_sum(klines.iter().map(|k| k.close), "close")?;
        let volume_sum = checked_sum(klines.iter().map(|k| k.volume), "volume")?;

        let mut max_close = first.close;
        let mut min_close = first.close;
        let mut highest_high = first.high;
        let mut lowest_low = first.low;
        for k in &klines[1..] {
            max_close = max_close.max(k.close);
            min_close = min_close.min(k.close);
            highest_high = highest_high.max(k.high);
            lowest_low = lowest_low.min(k.low);
        }

        let mean_close = divide(close_sum, count, "mean close")?;
        let mean_volume = divide(volume_sum, count, "mean volume")?;

        if first.close.is_zero() {
            return Err(ProviderError::Internal(
                "percent change is undefined for a zero opening close".to_string(),
            ));
        }
        let percent_change = percent(difference(last.close, first.close)?, first.close)?;

        let volume_ratio = if mean_volume.is_zero() {
            None
        } else {
            last.volume
                .checked_div(mean_volume)
                .map(|r| r.round_dp(PERCENT_DP))
        };

        let range = difference(highest_high, lowest_low)?;
        let range_position_percent = if range.is_zero() {
            None
        } else {
            Some(percent(difference(last.close, lowest_low)?, range)?)
        };

        Ok(Self {
            count: klines.len(),
            first_open_time: first.open_time,
            last_close_time: last.close_time,
            first_close: first.close,
            last_close: last.close,
            max_close,
            min_close,
            mean_close: mean_close.round_dp(PRICE_DP),
            mean_volume: mean_volume.round_dp(PRICE_DP),
            percent_change,
            highest_high,
            lowest_low,
            volume_ratio,
            range_position_percent,
        })
    }
}

fn checked_sum(mut values: impl Iterator<Item = Decimal>, field: &str) -> Result<Decimal> {
    values.try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v)
            .ok_or_else(|| ProviderError::Internal(format!("kline {} sum overflowed", field)))
    })
}

fn difference(minuend: Decimal, subtrahend: Decimal) -> Result<Decimal> {
    minuend
        .checked_sub(subtrahend)
        .ok_or_else(|| ProviderError::Internal("kline difference overflowed".to_string()))
}

fn divide(numerator: Decimal, denominator: Decimal, what: &str) -> Result<Decimal> {
    numerator
        .checked_div(denominator)
        .ok_or_else(|| ProviderError::Internal(format!("cannot compute {}", what)))
}

fn percent(numerator: Decimal, denominator: Decimal) -> Result<Decimal> {
    divide(numerator, denominator, "percentage")?
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|p| p.round_dp(PERCENT_DP))
        .ok_or_else(|| ProviderError::Internal("percentage overflowed".to_string()))
}
