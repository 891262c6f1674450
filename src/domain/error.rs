//! Domain error types.

use crate::domain::indicator::IndicatorError;

/// Top-level error type for trendscan.
#[derive(Debug, thiserror::Error)]
pub enum TrendscanError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("market data unavailable for {ticker}: {reason}")]
    DataUnavailable { ticker: String, reason: String },

    #[error("insufficient data for {ticker}: have {bars} candles, need {minimum}")]
    InsufficientData {
        ticker: String,
        bars: usize,
        minimum: usize,
    },

    #[error("{ticker}: {source}")]
    Indicator {
        ticker: String,
        #[source]
        source: IndicatorError,
    },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TrendscanError {
    /// True for the per-ticker failures a scan skips over.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            TrendscanError::DataUnavailable { .. }
                | TrendscanError::InsufficientData { .. }
                | TrendscanError::Indicator { .. }
        )
    }
}

impl From<&TrendscanError> for std::process::ExitCode {
    fn from(err: &TrendscanError) -> Self {
        let code: u8 = match err {
            TrendscanError::Io(_) | TrendscanError::Csv(_) | TrendscanError::Report { .. } => 1,
            TrendscanError::ConfigParse { .. } | TrendscanError::ConfigInvalid { .. } => 2,
            TrendscanError::DataUnavailable { .. } => 3,
            TrendscanError::InsufficientData { .. } | TrendscanError::Indicator { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
