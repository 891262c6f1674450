//! Technical indicator implementations.
//!
//! Every indicator is a pure function over an ordered candle slice. When the
//! slice is shorter than the indicator's minimum window the function returns
//! [`IndicatorError::InsufficientData`] instead of a number.
//!
//! - `IndicatorType`: indicator identity + parameters, used in error reports
//! - `IndicatorPoint` / `IndicatorSeries`: a dated time series of values
//! - `IndicatorError`: the explicit insufficient-data result

pub mod activity;
pub mod atr;
pub mod bollinger;
pub mod dmi;
pub mod mfi;
pub mod rsi;
pub mod sma;
pub mod supertrend;
pub mod swing;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Most recent value, if the series is non-empty.
    pub fn latest(&self) -> Option<f64> {
        self.values.last().map(|p| p.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
    Atr(usize),
    Mfi(usize),
    Swing(usize),
    AvgVolume(usize),
    AvgSpread(usize),
    Dmi {
        fast: usize,
        slow: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
    Supertrend {
        atr_period: usize,
        multiplier_x100: u32,
    },
    Confirmation,
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Atr(period) => write!(f, "ATR({})", period),
            IndicatorType::Mfi(period) => write!(f, "MFI({})", period),
            IndicatorType::Swing(period) => write!(f, "SWING({})", period),
            IndicatorType::AvgVolume(period) => write!(f, "AVG_VOLUME({})", period),
            IndicatorType::AvgSpread(period) => write!(f, "AVG_SPREAD({})", period),
            IndicatorType::Dmi { fast, slow } => write!(f, "DMI({},{})", fast, slow),
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
            IndicatorType::Supertrend {
                atr_period,
                multiplier_x100,
            } => {
                let mult = *multiplier_x100 as f64 / 100.0;
                write!(f, "SUPERTREND({},{})", atr_period, mult)
            }
            IndicatorType::Confirmation => write!(f, "CONFIRMATION"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndicatorError {
    #[error("{indicator}: insufficient data (have {have} candles, need {need})")]
    InsufficientData {
        indicator: IndicatorType,
        have: usize,
        need: usize,
    },

    #[error("{indicator}: period must be at least 1")]
    InvalidPeriod { indicator: IndicatorType },
}

/// Fail with `InsufficientData` unless `have >= need`.
pub(crate) fn require(indicator: IndicatorType, have: usize, need: usize) -> Result<(), IndicatorError> {
    if have < need {
        return Err(IndicatorError::InsufficientData {
            indicator,
            have,
            need,
        });
    }
    Ok(())
}

pub(crate) fn require_period(indicator: &IndicatorType, period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod {
            indicator: indicator.clone(),
        });
    }
    Ok(())
}
