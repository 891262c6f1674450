//! Volume and trend confirmation flags that gate composite signals.

use crate::domain::indicator::sma::calculate_sma;
use crate::domain::indicator::{require, IndicatorError, IndicatorType};
use crate::domain::ohlcv::Candle;

const VOLUME_LOOKBACK: usize = 20;
const TREND_SMA_PERIOD: usize = 50;

/// Candles needed for [`confirmation_metrics`].
pub const MIN_CONFIRMATION_CANDLES: usize = 51;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Confirmation {
    /// Current volume over the mean volume of the 20 candles before it.
    pub vol_ratio: f64,
    /// Close above SMA(50).
    pub price_above_sma50: bool,
}

/// When the 20-candle volume baseline is zero the ratio is reported as 0,
/// which never confirms a breakout.
pub fn confirmation_metrics(candles: &[Candle]) -> Result<Confirmation, IndicatorError> {
    require(
        IndicatorType::Confirmation,
        candles.len(),
        MIN_CONFIRMATION_CANDLES,
    )?;

    let last = candles.len() - 1;
    let current = &candles[last];
    let baseline = &candles[last - VOLUME_LOOKBACK..last];
    let avg_volume =
        baseline.iter().map(|c| c.volume as f64).sum::<f64>() / VOLUME_LOOKBACK as f64;
    let vol_ratio = if avg_volume > 0.0 {
        current.volume as f64 / avg_volume
    } else {
        0.0
    };

    let sma50 = calculate_sma(candles, TREND_SMA_PERIOD)?;

    Ok(Confirmation {
        vol_ratio,
        price_above_sma50: current.close > sma50,
    })
}
