//! Analysis configuration.
//!
//! Capital, risk fraction and indicator windows are carried explicitly into
//! the pipeline instead of living in globals, so every run can override them.

use crate::domain::indicator::dmi::DmiParams;
use crate::ports::config_port::ConfigPort;

/// Calendar days fetched before the as-of date: two years plus a 300-day warmup.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 731 + 300;

/// About a century of calendar days; longer windows are rejected.
pub const MAX_LOOKBACK_DAYS: i64 = 36_500;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub total_capital: f64,
    pub risk_fraction: f64,
    pub min_history: usize,
    pub rsi_period: usize,
    pub dmi: DmiParams,
    pub bollinger_period: usize,
    pub bollinger_mult_x100: u32,
    pub atr_period: usize,
    pub supertrend_atr_period: usize,
    pub supertrend_multiplier: f64,
    pub mfi_period: usize,
    pub swing_period: usize,
    pub lookback_days: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            total_capital: 20_000.0,
            risk_fraction: 0.01,
            min_history: 200,
            rsi_period: 14,
            dmi: DmiParams::default(),
            bollinger_period: 20,
            bollinger_mult_x100: 200,
            atr_period: 14,
            supertrend_atr_period: 10,
            supertrend_multiplier: 3.0,
            mfi_period: 14,
            swing_period: 20,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl AnalysisConfig {
    /// Read the `[analysis]` section, falling back to defaults per key.
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let d = Self::default();
        let usize_key = |key: &str, default: usize| -> usize {
            let value = config.get_int("analysis", key, default as i64);
            usize::try_from(value).unwrap_or(0)
        };

        Self {
            total_capital: config.get_double("analysis", "total_capital", d.total_capital),
            risk_fraction: config.get_double("analysis", "risk_fraction", d.risk_fraction),
            min_history: usize_key("min_history", d.min_history),
            rsi_period: usize_key("rsi_period", d.rsi_period),
            dmi: DmiParams {
                fast_period: usize_key("dmi_fast_period", d.dmi.fast_period),
                slow_period: usize_key("dmi_slow_period", d.dmi.slow_period),
            },
            bollinger_period: usize_key("bollinger_period", d.bollinger_period),
            bollinger_mult_x100: (config.get_double(
                "analysis",
                "bollinger_multiplier",
                d.bollinger_mult_x100 as f64 / 100.0,
            ) * 100.0)
                .round()
                .max(0.0) as u32,
            atr_period: usize_key("atr_period", d.atr_period),
            supertrend_atr_period: usize_key("supertrend_atr_period", d.supertrend_atr_period),
            supertrend_multiplier: config.get_double(
                "analysis",
                "supertrend_multiplier",
                d.supertrend_multiplier,
            ),
            mfi_period: usize_key("mfi_period", d.mfi_period),
            swing_period: usize_key("swing_period", d.swing_period),
            lookback_days: config.get_int("analysis", "lookback_days", d.lookback_days),
        }
    }

    /// Capital put at risk on a single trade.
    pub fn risk_capital(&self) -> f64 {
        self.total_capital * self.risk_fraction
    }
}
