//! The per-(ticker, date) analysis result handed to report sinks.

use crate::domain::advisor::CompositeState;
use crate::domain::indicator::activity::SurgeFlag;
use crate::domain::indicator::bollinger::BollingerBands;
use crate::domain::indicator::supertrend::Supertrend;
use crate::domain::indicator::swing::SwingLevels;
use crate::domain::sizing::TradePlan;
use crate::domain::trend::MultiTimeframeDmi;
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTrend {
    StrongUptrend,
    Mixed,
}

impl PriceTrend {
    /// Strong uptrend when close > SMA20 > SMA50 > SMA150.
    pub fn classify(close: f64, sma20: f64, sma50: f64, sma150: f64) -> Self {
        if close > sma20 && sma20 > sma50 && sma50 > sma150 {
            PriceTrend::StrongUptrend
        } else {
            PriceTrend::Mixed
        }
    }
}

impl fmt::Display for PriceTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceTrend::StrongUptrend => f.write_str("STRONG UPTREND"),
            PriceTrend::Mixed => f.write_str("MIXED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsiReadings {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingAverages {
    pub sma20: f64,
    pub sma50: f64,
    pub sma150: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurgeFlags {
    pub spread_short: SurgeFlag,
    pub spread_long: SurgeFlag,
    pub volume_short: SurgeFlag,
    pub volume_long: SurgeFlag,
}

/// Immutable once built by the pipeline; owned by the caller afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRecord {
    pub date: NaiveDate,
    pub ticker: String,
    pub name: String,
    pub close: f64,
    pub bollinger: BollingerBands,
    pub diff_bb_low_pct: f64,
    pub diff_bb_high_pct: f64,
    pub atr: f64,
    pub supertrend: Supertrend,
    pub mfi: f64,
    pub swing: SwingLevels,
    pub rsi: RsiReadings,
    pub dmi: MultiTimeframeDmi,
    pub sma: MovingAverages,
    pub price_trend: PriceTrend,
    pub vol_ratio: f64,
    pub price_above_sma50: bool,
    pub state: CompositeState,
    pub plan: TradePlan,
    pub surges: SurgeFlags,
}

impl ReportRecord {
    pub fn action(&self) -> &'static str {
        self.state.action()
    }

    pub fn confidence(&self) -> &'static str {
        self.state.confidence()
    }
}

/// Percentage distance of `close` from `band`: `(close - band) / band × 100`.
pub fn band_distance_pct(close: f64, band: f64) -> f64 {
    if band == 0.0 {
        0.0
    } else {
        (close - band) / band * 100.0
    }
}
