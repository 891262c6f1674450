//! RSI (Relative Strength Index) with Wilder's smoothing.
//!
//! - Seed: simple mean of gains/losses over the first `period` close changes
//! - Subsequent: avg = (prev_avg * (period-1) + current) / period
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100
//!
//! One value per candle from index `period` onward; needs `period + 1` candles.

use crate::domain::indicator::{
    require, require_period, IndicatorError, IndicatorPoint, IndicatorSeries, IndicatorType,
};
use crate::domain::ohlcv::Candle;

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}

pub fn calculate_rsi(candles: &[Candle], period: usize) -> Result<IndicatorSeries, IndicatorError> {
    let indicator_type = IndicatorType::Rsi(period);
    require_period(&indicator_type, period)?;
    require(indicator_type.clone(), candles.len(), period + 1)?;

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let change = candles[i].close - candles[i - 1].close;
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss -= change;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    let mut values = Vec::with_capacity(candles.len() - period);
    values.push(IndicatorPoint {
        date: candles[period].date,
        value: rsi_value(avg_gain, avg_loss),
    });

    let n = period as f64;
    for i in (period + 1)..candles.len() {
        let change = candles[i].close - candles[i - 1].close;
        let gain = if change > 0.0 { change } else { 0.0 };
        let loss = if change < 0.0 { -change } else { 0.0 };
        avg_gain = (avg_gain * (n - 1.0) + gain) / n;
        avg_loss = (avg_loss * (n - 1.0) + loss) / n;
        values.push(IndicatorPoint {
            date: candles[i].date,
            value: rsi_value(avg_gain, avg_loss),
        });
    }

    Ok(IndicatorSeries {
        indicator_type,
        values,
    })
}

/// Latest RSI value; what multi-timeframe callers consume.
pub fn latest_rsi(candles: &[Candle], period: usize) -> Result<f64, IndicatorError> {
    let series = calculate_rsi(candles, period)?;
    series.latest().ok_or(IndicatorError::InsufficientData {
        indicator: IndicatorType::Rsi(period),
        have: candles.len(),
        need: period + 1,
    })
}
