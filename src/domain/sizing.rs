//! ATR-based trade plan: entry, stop, target and risk-sized share count.

use crate::domain::ohlcv::Candle;

pub const STOP_ATR_MULTIPLE: f64 = 2.0;
pub const TARGET_ATR_MULTIPLE: f64 = 3.0;

/// Candles back from the most recent one that the entry price is taken from.
pub const ENTRY_OFFSET: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradePlan {
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
    pub risk_per_share: f64,
    pub shares: u64,
}

/// Build the plan from the OHLC average of the candle three positions before
/// the most recent one. Returns `None` when there are not enough candles.
///
/// shares = floor(risk_capital / risk_per_share), or 0 when the risk per
/// share is not positive.
pub fn plan_trade(candles: &[Candle], atr: f64, risk_capital: f64) -> Option<TradePlan> {
    let index = candles.len().checked_sub(ENTRY_OFFSET + 1)?;
    let entry = candles[index].ohlc_average();
    let stop = entry - STOP_ATR_MULTIPLE * atr;
    let target = entry + TARGET_ATR_MULTIPLE * atr;
    let risk_per_share = entry - stop;

    let shares = if risk_per_share > 0.0 {
        (risk_capital / risk_per_share).floor() as u64
    } else {
        0
    };

    Some(TradePlan {
        entry,
        stop,
        target,
        risk_per_share,
        shares,
    })
}
