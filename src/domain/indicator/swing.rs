//! Swing levels: highest high and lowest low over the trailing window.

use crate::domain::indicator::{require, require_period, IndicatorError, IndicatorType};
use crate::domain::ohlcv::Candle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingLevels {
    pub high: f64,
    pub low: f64,
}

pub fn calculate_swing_levels(candles: &[Candle], period: usize) -> Result<SwingLevels, IndicatorError> {
    let indicator_type = IndicatorType::Swing(period);
    require_period(&indicator_type, period)?;
    require(indicator_type, candles.len(), period)?;

    let window = &candles[candles.len() - period..];
    Ok(SwingLevels {
        high: window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max),
        low: window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min),
    })
}
