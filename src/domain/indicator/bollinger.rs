//! Bollinger Bands.
//!
//! - Middle: SMA of closes over `period`
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! StdDev is the population standard deviation (divides by N, not N-1), so
//! upper ≥ middle ≥ lower for any non-negative multiplier.
//!
//! Default parameters: period=20, multiplier=2.0

use crate::domain::indicator::{require, require_period, IndicatorError, IndicatorType};
use crate::domain::ohlcv::Candle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub mid: f64,
    pub lower: f64,
}

pub fn calculate_bollinger(
    candles: &[Candle],
    period: usize,
    stddev_mult_x100: u32,
) -> Result<BollingerBands, IndicatorError> {
    let indicator_type = IndicatorType::Bollinger {
        period,
        stddev_mult_x100,
    };
    require_period(&indicator_type, period)?;
    require(indicator_type, candles.len(), period)?;

    let mult = stddev_mult_x100 as f64 / 100.0;
    let window = &candles[candles.len() - period..];

    let mid: f64 = window.iter().map(|c| c.close).sum::<f64>() / period as f64;
    let variance: f64 = window
        .iter()
        .map(|c| {
            let diff = c.close - mid;
            diff * diff
        })
        .sum::<f64>()
        / period as f64;
    let stddev = variance.sqrt();

    Ok(BollingerBands {
        upper: mid + mult * stddev,
        mid,
        lower: mid - mult * stddev,
    })
}
