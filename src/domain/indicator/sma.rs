//! Simple moving average of closes over the trailing window.

use crate::domain::indicator::{require, require_period, IndicatorError, IndicatorType};
use crate::domain::ohlcv::Candle;

pub fn calculate_sma(candles: &[Candle], period: usize) -> Result<f64, IndicatorError> {
    let indicator_type = IndicatorType::Sma(period);
    require_period(&indicator_type, period)?;
    require(indicator_type, candles.len(), period)?;

    let window = &candles[candles.len() - period..];
    Ok(window.iter().map(|c| c.close).sum::<f64>() / period as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::flat;

    #[test]
    fn sma_uses_trailing_window() {
        let candles = flat(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((calculate_sma(&candles, 3).unwrap() - 4.0).abs() < f64::EPSILON);
        assert!((calculate_sma(&candles, 5).unwrap() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sma_insufficient() {
        let candles = flat(&[1.0, 2.0]);
        assert!(matches!(
            calculate_sma(&candles, 3),
            Err(IndicatorError::InsufficientData { have: 2, need: 3, .. })
        ));
    }

    #[test]
    fn sma_zero_period() {
        assert!(matches!(
            calculate_sma(&flat(&[1.0]), 0),
            Err(IndicatorError::InvalidPeriod { .. })
        ));
    }
}
