//! Trend classification on top of ADX/DMI output.
//!
//! Turns slow/fast directional readings into a trend-health state and a
//! BUY/SELL signal, and assembles the daily/weekly/monthly DMI record.

use crate::domain::indicator::dmi::{calculate_dmi, DmiParams, DmiReading};
use crate::domain::ohlcv::Candle;
use std::fmt;
use tracing::debug;

/// Daily candles needed before any multi-timeframe DMI is attempted.
pub const MIN_DMI_DAILY_CANDLES: usize = 40;

const QUIET_ADX: f64 = 20.0;
const POWER_ADX: f64 = 40.0;
const BUY_TRIGGER_ADX: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrendHealth {
    Quiet,
    Strengthening,
    Weakening,
    PowerTrend,
    Exhausting,
}

impl TrendHealth {
    /// Classify from the slow ADX and its previous value.
    ///
    /// `< 20` quiet; `20..40` strengthening if rising else weakening;
    /// `>= 40` power trend if rising else exhausting.
    pub fn classify(adx: f64, prev_adx: f64) -> Self {
        let rising = adx > prev_adx;
        if adx < QUIET_ADX {
            TrendHealth::Quiet
        } else if adx < POWER_ADX {
            if rising {
                TrendHealth::Strengthening
            } else {
                TrendHealth::Weakening
            }
        } else if rising {
            TrendHealth::PowerTrend
        } else {
            TrendHealth::Exhausting
        }
    }
}

impl fmt::Display for TrendHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendHealth::Quiet => "QUIET / ACCUMULATION",
            TrendHealth::Strengthening => "STRENGTHENING TREND",
            TrendHealth::Weakening => "WEAKENING TREND",
            TrendHealth::PowerTrend => "POWER TREND (VERTICAL)",
            TrendHealth::Exhausting => "OVEREXTENDED / EXHAUSTING",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DmiSignal {
    Buy,
    Sell,
    NoSignal,
}

/// Current and previous directional values feeding [`DmiSignal::classify`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalInputs {
    pub fast_adx: f64,
    pub prev_fast_adx: f64,
    pub fast_pdi: f64,
    pub prev_fast_pdi: f64,
    pub fast_mdi: f64,
    pub slow_adx: f64,
    pub prev_slow_adx: f64,
    pub slow_pdi: f64,
    pub slow_mdi: f64,
}

impl DmiSignal {
    /// BUY: fast ADX > 25 and rising, fast +DI rising and above fast -DI.
    /// SELL: slow ADX falling, or slow -DI above slow +DI. SELL wins over BUY.
    pub fn classify(inputs: &SignalInputs) -> Self {
        let sell = inputs.slow_adx < inputs.prev_slow_adx || inputs.slow_mdi > inputs.slow_pdi;
        if sell {
            return DmiSignal::Sell;
        }

        let buy = inputs.fast_adx > BUY_TRIGGER_ADX
            && inputs.fast_adx > inputs.prev_fast_adx
            && inputs.fast_pdi > inputs.prev_fast_pdi
            && inputs.fast_pdi > inputs.fast_mdi;
        if buy { DmiSignal::Buy } else { DmiSignal::NoSignal }
    }
}

impl fmt::Display for DmiSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DmiSignal::Buy => f.write_str("BUY"),
            DmiSignal::Sell => f.write_str("SELL"),
            DmiSignal::NoSignal => Ok(()),
        }
    }
}

/// DMI per timeframe. Weekly and monthly are absent when the aggregated
/// series is too short for the configured periods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiTimeframeDmi {
    pub daily: DmiReading,
    pub weekly: Option<DmiReading>,
    pub monthly: Option<DmiReading>,
}

/// Returns `None` when the daily series has fewer than
/// [`MIN_DMI_DAILY_CANDLES`] candles or the daily DMI itself cannot be computed.
pub fn multi_timeframe_dmi(
    daily: &[Candle],
    weekly: &[Candle],
    monthly: &[Candle],
    params: &DmiParams,
) -> Option<MultiTimeframeDmi> {
    if daily.len() < MIN_DMI_DAILY_CANDLES {
        debug!(
            candles = daily.len(),
            minimum = MIN_DMI_DAILY_CANDLES,
            "daily series too short for multi-timeframe DMI"
        );
        return None;
    }

    let daily_reading = match calculate_dmi(daily, params) {
        Ok(reading) => reading,
        Err(e) => {
            debug!(error = %e, "daily DMI unavailable");
            return None;
        }
    };

    let optional = |series: &[Candle], label: &str| match calculate_dmi(series, params) {
        Ok(reading) => Some(reading),
        Err(e) => {
            debug!(timeframe = label, error = %e, "DMI unavailable");
            None
        }
    };

    Some(MultiTimeframeDmi {
        daily: daily_reading,
        weekly: optional(weekly, "weekly"),
        monthly: optional(monthly, "monthly"),
    })
}
