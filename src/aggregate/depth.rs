//! Spread and depth summary for an order book snapshot

use super::{parse_decimal, PERCENT_DP};
use crate::binance::{OrderBookSnapshot, PriceLevel};
use crate::error::{ProviderError, Result};
use rust_decimal::Decimal;
use serde::Serialize;

/// One side must outweigh the other by this factor to count as pressure
const PRESSURE_FACTOR: Decimal = Decimal::from_parts(12, 0, 0, false, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Pressure {
    BuyPressure,
    SellPressure,
    Balanced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBookSummary {
    pub best_bid: Decimal,
    pub best_ask: Decimal,
    pub spread: Decimal,
    /// Spread as a percentage of the best bid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread_percent: Option<Decimal>,
    /// Sum of bid quantities
    pub bid_depth: Decimal,
    /// Sum of ask quantities
    pub ask_depth: Decimal,
    pub pressure: Pressure,
}

/// `None` when either side of the book is empty
pub fn order_book_summary(book: &OrderBookSnapshot) -> Result<Option<OrderBookSummary>> {
    let (best_bid, best_ask) = match (book.bids.first(), book.asks.first()) {
        (Some(bid), Some(ask)) => (price(bid, &book.symbol)?, price(ask, &book.symbol)?),
        _ => return Ok(None),
    };

    let spread = best_ask.checked_sub(best_bid).ok_or_else(|| {
        ProviderError::Internal(format!("order book spread overflowed for {}", book.symbol))
    })?;
    let spread_percent = if best_bid.is_zero() {
        None
    } else {
        spread
            .checked_div(best_bid)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .map(|p| p.round_dp(PERCENT_DP))
    };

    let bid_depth = depth(&book.bids, &book.symbol)?;
    let ask_depth = depth(&book.asks, &book.symbol)?;

    let pressure = if bid_depth > ask_depth.saturating_mul(PRESSURE_FACTOR) {
        Pressure::BuyPressure
    } else if ask_depth > bid_depth.saturating_mul(PRESSURE_FACTOR) {
        Pressure::SellPressure
    } else {
        Pressure::Balanced
    };

    Ok(Some(OrderBookSummary {
        best_bid,
        best_ask,
        spread,
        spread_percent,
        bid_depth,
        ask_depth,
        pressure,
    }))
}

fn price(level: &PriceLevel, symbol: &str) -> Result<Decimal> {
    parse_decimal(&level.0).ok_or_else(|| {
        ProviderError::Internal(format!("unparsable order book price {:?} for {}", level.0, symbol))
    })
}

fn depth(levels: &[PriceLevel], symbol: &str) -> Result<Decimal> {
    levels.iter().try_fold(Decimal::ZERO, |acc, (_, qty)| {
        let qty = parse_decimal(qty).ok_or_else(|| {
            ProviderError::Internal(format!("unparsable order book quantity {:?} for {}", qty, symbol))
        })?;
        Ok(acc.saturating_add(qty))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn book(bids: &[(&str, &str)], asks: &[(&str, &str)]) -> OrderBookSnapshot {
        let side = |levels: &[(&str, &str)]| {
            levels
                .iter()
                .map(|(p, q)| (p.to_string(), q.to_string()))
                .collect()
        };
        OrderBookSnapshot {
            symbol: "BTCUSDT".to_string(),
            last_update_id: 1,
            bids: side(bids),
            asks: side(asks),
        }
    }

    #[test]
    fn test_pressure_factor_is_one_point_two() {
        assert_eq!(PRESSURE_FACTOR, d("1.2"));
    }

    #[test]
    fn test_spread_and_depth() {
        let snapshot = book(
            &[("100.00", "1.5"), ("99.50", "2")],
            &[("100.50", "1"), ("101.00", "0.5")],
        );
        let summary = order_book_summary(&snapshot).unwrap().unwrap();

        assert_eq!(summary.best_bid, d("100"));
        assert_eq!(summary.best_ask, d("100.5"));
        assert_eq!(summary.spread, d("0.5"));
        assert_eq!(summary.spread_percent, Some(d("0.5")));
        assert_eq!(summary.bid_depth, d("3.5"));
        assert_eq!(summary.ask_depth, d("1.5"));
        assert_eq!(summary.pressure, Pressure::BuyPressure);
    }

    #[test]
    fn test_pressure_labels() {
        let sell = book(&[("10", "1")], &[("11", "1.3")]);
        assert_eq!(order_book_summary(&sell).unwrap().unwrap().pressure, Pressure::SellPressure);

        // Exactly 1.2x is not enough
        let even = book(&[("10", "1.2")], &[("11", "1")]);
        assert_eq!(order_book_summary(&even).unwrap().unwrap().pressure, Pressure::Balanced);
    }

    #[test]
    fn test_empty_side_has_no_summary() {
        assert_eq!(order_book_summary(&book(&[], &[("1", "1")])).unwrap(), None);
        assert_eq!(order_book_summary(&book(&[("1", "1")], &[])).unwrap(), None);
    }

    #[test]
    fn test_zero_bid_has_no_spread_percent() {
        let summary = order_book_summary(&book(&[("0", "1")], &[("1", "1")]))
            .unwrap()
            .unwrap();
        assert_eq!(summary.spread_percent, None);
    }

    #[test]
    fn test_malformed_level_is_internal_error() {
        let err = order_book_summary(&book(&[("abc", "1")], &[("1", "1")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalError);

        let err = order_book_summary(&book(&[("1", "1")], &[("2", "x")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalError);
    }

    #[test]
    fn test_spread_overflow_is_internal_error() {
        let snapshot = book(
            &[("-79228162514264337593543950335", "1")],
            &[("79228162514264337593543950335", "1")],
        );
        let err = order_book_summary(&snapshot).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalError);
    }
}
