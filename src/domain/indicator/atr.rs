//! Average True Range.
//!
//! The reported ATR is the plain mean of the trailing `period` true ranges.
//! [`wilder_atr_series`] is the Wilder-smoothed variant that Supertrend
//! ratchets its bands on.

use crate::domain::indicator::{require, require_period, IndicatorError, IndicatorType};
use crate::domain::ohlcv::Candle;

/// True range for each adjacent pair; element `i` belongs to candle `i + 1`.
pub fn true_ranges(candles: &[Candle]) -> Vec<f64> {
    candles
        .windows(2)
        .map(|pair| pair[1].true_range(pair[0].close))
        .collect()
}

/// Mean true range over the trailing `period` candle pairs.
///
/// Needs `period + 1` candles.
pub fn calculate_atr(candles: &[Candle], period: usize) -> Result<f64, IndicatorError> {
    let indicator_type = IndicatorType::Atr(period);
    require_period(&indicator_type, period)?;
    require(indicator_type, candles.len(), period + 1)?;

    let trs = true_ranges(candles);
    Ok(trs[trs.len() - period..].iter().sum::<f64>() / period as f64)
}

/// Wilder ATR aligned with `candles`: `None` before index `period - 1`.
///
/// The first candle's true range is its own high - low. The seed at index
/// `period - 1` is the mean of the first `period` true ranges; thereafter
/// atr = (prev_atr * (period-1) + tr) / period.
pub(crate) fn wilder_atr_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; candles.len()];
    if period == 0 || candles.len() < period {
        return result;
    }

    let mut tr_values: Vec<f64> = Vec::with_capacity(candles.len());
    for (i, candle) in candles.iter().enumerate() {
        let tr = if i == 0 {
            candle.spread()
        } else {
            candle.true_range(candles[i - 1].close)
        };
        tr_values.push(tr);
    }

    let n = period as f64;
    let mut atr = tr_values[..period].iter().sum::<f64>() / n;
    result[period - 1] = Some(atr);
    for i in period..candles.len() {
        atr = (atr * (n - 1.0) + tr_values[i]) / n;
        result[i] = Some(atr);
    }
    result
}
