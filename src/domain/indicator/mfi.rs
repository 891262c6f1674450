//! MFI (Money Flow Index), a volume-weighted RSI analogue.
//!
//! Over the trailing `period + 1` candles, each candle's raw flow
//! (typical price × volume) counts as positive when its typical price is
//! above the previous candle's, otherwise as negative.
//!
//! MFI = 100 - 100 / (1 + positive / negative); 100 when negative flow is 0.

use crate::domain::indicator::{require, require_period, IndicatorError, IndicatorType};
use crate::domain::ohlcv::Candle;

pub fn calculate_mfi(candles: &[Candle], period: usize) -> Result<f64, IndicatorError> {
    let indicator_type = IndicatorType::Mfi(period);
    require_period(&indicator_type, period)?;
    require(indicator_type, candles.len(), period + 1)?;

    let window = &candles[candles.len() - (period + 1)..];
    let mut positive = 0.0;
    let mut negative = 0.0;
    for pair in window.windows(2) {
        let tp = pair[1].typical_price();
        let raw_flow = tp * pair[1].volume as f64;
        if tp > pair[0].typical_price() {
            positive += raw_flow;
        } else {
            negative += raw_flow;
        }
    }

    if negative == 0.0 {
        return Ok(100.0);
    }
    Ok(100.0 - 100.0 / (1.0 + positive / negative))
}
