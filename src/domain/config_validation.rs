//! Configuration validation.
//!
//! Runs before any data is fetched so a bad config fails fast with a config
//! exit code instead of skipping every ticker.

use crate::domain::config::{AnalysisConfig, MAX_LOOKBACK_DAYS};
use crate::domain::confirmation::MIN_CONFIRMATION_CANDLES;
use crate::domain::error::TrendscanError;
use crate::domain::universe::parse_tickers;
use crate::ports::config_port::ConfigPort;

fn invalid(key: &str, reason: impl Into<String>) -> TrendscanError {
    TrendscanError::ConfigInvalid {
        section: "analysis".to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_analysis_config(config: &AnalysisConfig) -> Result<(), TrendscanError> {
    if !(config.total_capital > 0.0) {
        return Err(invalid("total_capital", "total_capital must be positive"));
    }
    if !(config.risk_fraction > 0.0 && config.risk_fraction <= 1.0) {
        return Err(invalid(
            "risk_fraction",
            "risk_fraction must be in (0, 1]",
        ));
    }
    if config.min_history < MIN_CONFIRMATION_CANDLES {
        return Err(invalid(
            "min_history",
            format!("min_history must be at least {}", MIN_CONFIRMATION_CANDLES),
        ));
    }
    if !(config.supertrend_multiplier > 0.0) {
        return Err(invalid(
            "supertrend_multiplier",
            "supertrend_multiplier must be positive",
        ));
    }
    if !(1..=MAX_LOOKBACK_DAYS).contains(&config.lookback_days) {
        return Err(invalid(
            "lookback_days",
            format!("lookback_days must be between 1 and {}", MAX_LOOKBACK_DAYS),
        ));
    }

    let periods = [
        ("rsi_period", config.rsi_period),
        ("dmi_fast_period", config.dmi.fast_period),
        ("dmi_slow_period", config.dmi.slow_period),
        ("bollinger_period", config.bollinger_period),
        ("atr_period", config.atr_period),
        ("supertrend_atr_period", config.supertrend_atr_period),
        ("mfi_period", config.mfi_period),
        ("swing_period", config.swing_period),
    ];
    for (key, period) in periods {
        if period == 0 {
            return Err(invalid(key, format!("{} must be at least 1", key)));
        }
    }
    Ok(())
}

/// Checks the `[scan]` ticker list when one is given.
pub fn validate_scan_config(config: &dyn ConfigPort) -> Result<(), TrendscanError> {
    if let Some(list) = config.get_string("scan", "tickers") {
        parse_tickers(&list).map_err(|e| TrendscanError::ConfigInvalid {
            section: "scan".to_string(),
            key: "tickers".to_string(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    fn invalid_key(err: TrendscanError) -> String {
        match err {
            TrendscanError::ConfigInvalid { key, .. } => key,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn defaults_pass() {
        assert!(validate_analysis_config(&AnalysisConfig::default()).is_ok());
    }

    #[test]
    fn capital_must_be_positive() {
        let config = AnalysisConfig {
            total_capital: 0.0,
            ..AnalysisConfig::default()
        };
        let err = validate_analysis_config(&config).unwrap_err();
        assert_eq!(invalid_key(err), "total_capital");
    }

    #[test]
    fn risk_fraction_range() {
        for bad in [0.0, -0.01, 1.5, f64::NAN] {
            let config = AnalysisConfig {
                risk_fraction: bad,
                ..AnalysisConfig::default()
            };
            let err = validate_analysis_config(&config).unwrap_err();
            assert_eq!(invalid_key(err), "risk_fraction");
        }
        let config = AnalysisConfig {
            risk_fraction: 1.0,
            ..AnalysisConfig::default()
        };
        assert!(validate_analysis_config(&config).is_ok());
    }

    #[test]
    fn min_history_floor() {
        let config = AnalysisConfig {
            min_history: 50,
            ..AnalysisConfig::default()
        };
        let err = validate_analysis_config(&config).unwrap_err();
        assert_eq!(invalid_key(err), "min_history");
    }

    #[test]
    fn zero_period_from_ini_fails() {
        let config = AnalysisConfig::from_config(&make_config("[analysis]\ndmi_slow_period = 0\n"));
        let err = validate_analysis_config(&config).unwrap_err();
        assert_eq!(invalid_key(err), "dmi_slow_period");
    }

    #[test]
    fn lookback_days_bounds() {
        for bad in [0, -5, MAX_LOOKBACK_DAYS + 1, 100_000_000] {
            let config = AnalysisConfig {
                lookback_days: bad,
                ..AnalysisConfig::default()
            };
            let err = validate_analysis_config(&config).unwrap_err();
            assert_eq!(invalid_key(err), "lookback_days");
        }
        let config = AnalysisConfig {
            lookback_days: MAX_LOOKBACK_DAYS,
            ..AnalysisConfig::default()
        };
        assert!(validate_analysis_config(&config).is_ok());
    }

    #[test]
    fn huge_lookback_from_ini_fails() {
        let config =
            AnalysisConfig::from_config(&make_config("[analysis]\nlookback_days = 100000000\n"));
        let err = validate_analysis_config(&config).unwrap_err();
        assert_eq!(invalid_key(err), "lookback_days");
    }

    #[test]
    fn scan_tickers_are_parsed() {
        let ok = make_config("[scan]\ntickers = ABB.ST:ABB, AZN.ST\n");
        assert!(validate_scan_config(&ok).is_ok());

        let dup = make_config("[scan]\ntickers = ABB.ST, abb.st\n");
        let err = validate_scan_config(&dup).unwrap_err();
        assert!(matches!(err, TrendscanError::ConfigInvalid { section, .. } if section == "scan"));
    }

    #[test]
    fn missing_scan_section_is_fine() {
        assert!(validate_scan_config(&make_config("[analysis]\n")).is_ok());
    }
}
