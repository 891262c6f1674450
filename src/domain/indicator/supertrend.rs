//! Supertrend trend-following overlay.
//!
//! Basic bands are `(high + low) / 2 ± multiplier × ATR` on Wilder ATR.
//! Final bands ratchet: the upper band only moves down and the lower band
//! only moves up, unless the previous close broke through the band, in which
//! case it resets to the basic value. The trend flips down when a close falls
//! under the final lower band and flips up when a close rises over the final
//! upper band. The reported value is the band on the active side.
//!
//! Default parameters: atr_period=10, multiplier=3.0

use crate::domain::indicator::atr::wilder_atr_series;
use crate::domain::indicator::{require, require_period, IndicatorError, IndicatorType};
use crate::domain::ohlcv::Candle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Up => f.write_str("UP"),
            TrendDirection::Down => f.write_str("DOWN"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Supertrend {
    pub value: f64,
    pub direction: TrendDirection,
}

fn indicator_type(atr_period: usize, multiplier: f64) -> IndicatorType {
    IndicatorType::Supertrend {
        atr_period,
        multiplier_x100: (multiplier * 100.0).round() as u32,
    }
}

/// Supertrend for every candle from index `atr_period` onward.
pub(crate) fn supertrend_path(
    candles: &[Candle],
    atr_period: usize,
    multiplier: f64,
) -> Result<Vec<Supertrend>, IndicatorError> {
    let ind = indicator_type(atr_period, multiplier);
    require_period(&ind, atr_period)?;
    require(ind, candles.len(), atr_period + 1)?;

    let atrs = wilder_atr_series(candles, atr_period);
    let mut direction = TrendDirection::Up;
    let mut final_upper = 0.0;
    let mut final_lower = 0.0;
    let mut path = Vec::with_capacity(candles.len() - atr_period);

    for i in atr_period..candles.len() {
        let candle = &candles[i];
        let atr = atrs[i].unwrap_or_default();
        let mid = (candle.high + candle.low) / 2.0;
        let basic_upper = mid + multiplier * atr;
        let basic_lower = mid - multiplier * atr;

        if i == atr_period {
            final_upper = basic_upper;
            final_lower = basic_lower;
        } else {
            let prev_close = candles[i - 1].close;
            if basic_upper < final_upper || prev_close > final_upper {
                final_upper = basic_upper;
            }
            if basic_lower > final_lower || prev_close < final_lower {
                final_lower = basic_lower;
            }

            direction = match direction {
                TrendDirection::Up if candle.close < final_lower => TrendDirection::Down,
                TrendDirection::Down if candle.close > final_upper => TrendDirection::Up,
                unchanged => unchanged,
            };
        }

        let value = match direction {
            TrendDirection::Up => final_lower,
            TrendDirection::Down => final_upper,
        };
        path.push(Supertrend { value, direction });
    }

    Ok(path)
}

/// Latest Supertrend value and direction. Needs `atr_period + 1` candles.
pub fn calculate_supertrend(
    candles: &[Candle],
    atr_period: usize,
    multiplier: f64,
) -> Result<Supertrend, IndicatorError> {
    let path = supertrend_path(candles, atr_period, multiplier)?;
    path.last().copied().ok_or(IndicatorError::InsufficientData {
        indicator: indicator_type(atr_period, multiplier),
        have: candles.len(),
        need: atr_period + 1,
    })
}
