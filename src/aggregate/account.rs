use super::parse_decimal;
use crate::binance::Balance;
use crate::error::{ProviderError, Result};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceRow {
    pub asset: String,
    pub free: Decimal,
    pub locked: Decimal,
    pub total: Decimal,
}

/// Assets holding a non-zero `free + locked`, largest total first
pub fn non_zero_balances(balances: &[Balance]) -> Result<Vec<BalanceRow>> {
    let mut rows = Vec::with_capacity(balances.len());
    for b in balances {
        let row = balance_row(b)?;
        if !row.total.is_zero() {
            rows.push(row);
        }
    }

    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.asset.cmp(&b.asset)));
    Ok(rows)
}

fn balance_row(balance: &Balance) -> Result<BalanceRow> {
    let amount = |raw: &str, field: &str| {
        parse_decimal(raw).ok_or_else(|| {
            ProviderError::Internal(format!(
                "unparsable {} balance {:?} for {}",
                field, raw, balance.asset
            ))
        })
    };
    let free = amount(&balance.free, "free")?;
    let locked = amount(&balance.locked, "locked")?;
    let total = free.checked_add(locked).ok_or_else(|| {
        ProviderError::Internal(format!("balance total overflowed for {}", balance.asset))
    })?;

    Ok(BalanceRow {
        asset: balance.asset.clone(),
        free,
        locked,
        total,
    })
}
