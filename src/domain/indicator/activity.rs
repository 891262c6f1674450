//! Trailing volume and spread averages, and the surge flag derived from them.

use crate::domain::indicator::{require, require_period, IndicatorError, IndicatorType};
use crate::domain::ohlcv::Candle;
use std::fmt;

/// A current value counts as a surge above this multiple of its average.
pub const SURGE_MULTIPLIER: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurgeFlag {
    High,
    Neutral,
}

impl SurgeFlag {
    pub fn from_ratio(current: f64, average: f64) -> Self {
        if current > SURGE_MULTIPLIER * average {
            SurgeFlag::High
        } else {
            SurgeFlag::Neutral
        }
    }
}

impl fmt::Display for SurgeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurgeFlag::High => f.write_str("High"),
            SurgeFlag::Neutral => f.write_str("Neutral"),
        }
    }
}

fn trailing_mean(
    candles: &[Candle],
    period: usize,
    indicator_type: IndicatorType,
    value: impl Fn(&Candle) -> f64,
) -> Result<f64, IndicatorError> {
    require_period(&indicator_type, period)?;
    require(indicator_type, candles.len(), period)?;
    let window = &candles[candles.len() - period..];
    Ok(window.iter().map(value).sum::<f64>() / period as f64)
}

/// Mean volume of the trailing `period` candles, current candle included.
pub fn average_volume(candles: &[Candle], period: usize) -> Result<f64, IndicatorError> {
    trailing_mean(candles, period, IndicatorType::AvgVolume(period), |c| {
        c.volume as f64
    })
}

/// Mean high - low of the trailing `period` candles, current candle included.
pub fn average_spread(candles: &[Candle], period: usize) -> Result<f64, IndicatorError> {
    trailing_mean(candles, period, IndicatorType::AvgSpread(period), Candle::spread)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::hlc;

    #[test]
    fn average_spread_trailing() {
        let candles = hlc(&[(110.0, 90.0, 100.0), (102.0, 100.0, 101.0), (104.0, 100.0, 102.0)]);
        assert!((average_spread(&candles, 2).unwrap() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn average_volume_trailing() {
        let mut candles = hlc(&[(1.0, 1.0, 1.0); 3]);
        candles[0].volume = 10;
        candles[1].volume = 20;
        candles[2].volume = 40;
        assert!((average_volume(&candles, 2).unwrap() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn averages_insufficient() {
        let candles = hlc(&[(1.0, 1.0, 1.0); 3]);
        assert!(average_volume(&candles, 4).is_err());
        assert!(average_spread(&candles, 4).is_err());
    }

    #[test]
    fn surge_flag_is_strictly_above_threshold() {
        assert_eq!(SurgeFlag::from_ratio(151.0, 100.0), SurgeFlag::High);
        assert_eq!(SurgeFlag::from_ratio(150.0, 100.0), SurgeFlag::Neutral);
        assert_eq!(SurgeFlag::High.to_string(), "High");
    }
}
