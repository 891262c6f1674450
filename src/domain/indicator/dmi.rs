//! Dual-period ADX / DMI (Directional Movement Index).
//!
//! Raw per-pair values:
//! - TR  = max(high - low, |high - prev_close|, |low - prev_close|)
//! - +DM = up_move if up_move > down_move and up_move > 0, else 0
//! - -DM = down_move if down_move > up_move and down_move > 0, else 0
//!
//! Wilder smoothing (seeded by a plain sum, then
//! `s[i] = s[i-1] - s[i-1]/period + raw[i]`) is applied independently at a fast
//! period (early trigger) and a slow period (trend filter):
//! - +DI / -DI = smoothed DM / smoothed TR × 100 (0 when smoothed TR is 0)
//! - DX  = |+DI - -DI| / (+DI + -DI) × 100 (0 when both are 0)
//! - ADX = Wilder-smoothed DX / period
//!
//! Needs `2 × period + 10` candles for the longer of the two periods.

use crate::domain::indicator::{require, require_period, IndicatorError, IndicatorType};
use crate::domain::ohlcv::Candle;
use crate::domain::trend::{DmiSignal, SignalInputs, TrendHealth};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmiParams {
    pub fast_period: usize,
    pub slow_period: usize,
}

impl Default for DmiParams {
    fn default() -> Self {
        Self {
            fast_period: 5,
            slow_period: 5,
        }
    }
}

impl DmiParams {
    pub fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Dmi {
            fast: self.fast_period,
            slow: self.slow_period,
        }
    }

    /// Minimum candle count: `2 × period + 10` for the longer period.
    pub fn min_history(&self) -> usize {
        2 * self.fast_period.max(self.slow_period) + 10
    }
}

/// Current DMI state for one series.
///
/// `pdi`, `mdi` and `adx` come from the slow period; `fast_adx` from the fast one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DmiReading {
    pub pdi: f64,
    pub mdi: f64,
    pub adx: f64,
    pub fast_adx: f64,
    pub trend_health: TrendHealth,
    pub signal: DmiSignal,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DirectionalSeries {
    pub pdi: Vec<f64>,
    pub mdi: Vec<f64>,
    pub adx: Vec<f64>,
}

struct RawMovement {
    tr: Vec<f64>,
    plus_dm: Vec<f64>,
    minus_dm: Vec<f64>,
}

fn raw_movement(candles: &[Candle]) -> RawMovement {
    let mut raw = RawMovement {
        tr: Vec::with_capacity(candles.len()),
        plus_dm: Vec::with_capacity(candles.len()),
        minus_dm: Vec::with_capacity(candles.len()),
    };

    for pair in candles.windows(2) {
        let (prev, current) = (&pair[0], &pair[1]);
        let up_move = current.high - prev.high;
        let down_move = prev.low - current.low;

        raw.tr.push(current.true_range(prev.close));
        raw.plus_dm.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        raw.minus_dm.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });
    }
    raw
}

/// Wilder smoothing: seed with the plain sum of the first `period` values,
/// then `s = s - s / period + x` for each later value.
///
/// Returns `data.len() - period + 1` values, or nothing when `data` is shorter
/// than `period`. The accumulation order is fixed; do not rewrite it as an
/// equivalent EMA, the results drift apart in floating point.
pub(crate) fn wilder_smooth(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return Vec::new();
    }
    let p = period as f64;
    let mut smoothed = Vec::with_capacity(data.len() - period + 1);
    let mut current: f64 = data[..period].iter().sum();
    smoothed.push(current);
    for &x in &data[period..] {
        current = current - (current / p) + x;
        smoothed.push(current);
    }
    smoothed
}

fn directional_series(raw: &RawMovement, period: usize) -> DirectionalSeries {
    let s_tr = wilder_smooth(&raw.tr, period);
    let s_plus = wilder_smooth(&raw.plus_dm, period);
    let s_minus = wilder_smooth(&raw.minus_dm, period);

    let di = |dm: &[f64]| -> Vec<f64> {
        dm.iter()
            .zip(&s_tr)
            .map(|(&v, &tr)| if tr == 0.0 { 0.0 } else { v / tr * 100.0 })
            .collect()
    };
    let pdi = di(&s_plus);
    let mdi = di(&s_minus);

    let dx: Vec<f64> = pdi
        .iter()
        .zip(&mdi)
        .map(|(&p, &m)| {
            let sum = p + m;
            if sum == 0.0 {
                0.0
            } else {
                (p - m).abs() / sum * 100.0
            }
        })
        .collect();

    let adx = wilder_smooth(&dx, period)
        .into_iter()
        .map(|v| v / period as f64)
        .collect();

    DirectionalSeries { pdi, mdi, adx }
}

fn last_two(values: &[f64]) -> (f64, f64) {
    let n = values.len();
    (values[n - 1], values[n - 2])
}

/// Fast and slow directional series for `candles`.
pub(crate) fn dmi_series(
    candles: &[Candle],
    params: &DmiParams,
) -> Result<(DirectionalSeries, DirectionalSeries), IndicatorError> {
    let ind = params.indicator_type();
    require_period(&ind, params.fast_period)?;
    require_period(&ind, params.slow_period)?;
    require(ind, candles.len(), params.min_history())?;

    let raw = raw_movement(candles);
    Ok((
        directional_series(&raw, params.fast_period),
        directional_series(&raw, params.slow_period),
    ))
}

pub fn calculate_dmi(candles: &[Candle], params: &DmiParams) -> Result<DmiReading, IndicatorError> {
    let (fast, slow) = dmi_series(candles, params)?;

    let (fast_adx, prev_fast_adx) = last_two(&fast.adx);
    let (fast_pdi, prev_fast_pdi) = last_two(&fast.pdi);
    let (slow_adx, prev_slow_adx) = last_two(&slow.adx);
    let fast_mdi = fast.mdi[fast.mdi.len() - 1];
    let slow_pdi = slow.pdi[slow.pdi.len() - 1];
    let slow_mdi = slow.mdi[slow.mdi.len() - 1];

    let signal = DmiSignal::classify(&SignalInputs {
        fast_adx,
        prev_fast_adx,
        fast_pdi,
        prev_fast_pdi,
        fast_mdi,
        slow_adx,
        prev_slow_adx,
        slow_pdi,
        slow_mdi,
    });

    Ok(DmiReading {
        pdi: slow_pdi,
        mdi: slow_mdi,
        adx: slow_adx,
        fast_adx,
        trend_health: TrendHealth::classify(slow_adx, prev_slow_adx),
        signal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::hlc;

    /// Sideways chop followed by an accelerating advance with widening range.
    fn chop_then_rally() -> Vec<Candle> {
        let mut rows = Vec::new();
        for i in 0..40 {
            let base = if i % 2 == 0 { 100.0 } else { 101.0 };
            rows.push((base + 1.0, base - 1.0, base));
        }
        let mut base = 101.0;
        for k in 1..=12 {
            base += 1.0 + k as f64 * 0.5;
            let half_range = 1.0 + k as f64 * 0.1;
            rows.push((base + half_range, base - half_range, base + half_range * 0.8));
        }
        hlc(&rows)
    }

    #[test]
    fn wilder_smooth_seed_and_step() {
        let out = wilder_smooth(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(out.len(), 2);
        assert!((out[0] - 6.0).abs() < 1e-12);
        // 6 - 6/3 + 4
        assert!((out[1] - 8.0).abs() < 1e-12);
    }

    #[test]
    fn wilder_smooth_too_short() {
        assert!(wilder_smooth(&[1.0, 2.0], 3).is_empty());
    }

    #[test]
    fn dmi_insufficient_history() {
        let candles = hlc(&vec![(101.0, 99.0, 100.0); 19]);
        let err = calculate_dmi(&candles, &DmiParams::default()).unwrap_err();
        assert!(matches!(
            err,
            IndicatorError::InsufficientData { have: 19, need: 20, .. }
        ));
    }

    #[test]
    fn dmi_min_history_uses_longer_period() {
        let params = DmiParams {
            fast_period: 5,
            slow_period: 14,
        };
        assert_eq!(params.min_history(), 38);
        let params = DmiParams {
            fast_period: 14,
            slow_period: 5,
        };
        assert_eq!(params.min_history(), 38);
    }

    #[test]
    fn dmi_flat_series_is_quiet_with_no_signal() {
        let candles = hlc(&vec![(101.0, 99.0, 100.0); 30]);
        let reading = calculate_dmi(&candles, &DmiParams::default()).unwrap();
        assert_eq!(reading.pdi, 0.0);
        assert_eq!(reading.mdi, 0.0);
        assert_eq!(reading.adx, 0.0);
        assert_eq!(reading.trend_health, TrendHealth::Quiet);
        assert_eq!(reading.signal, DmiSignal::NoSignal);
    }

    #[test]
    fn dmi_steady_advance_has_no_minus_di() {
        let rows: Vec<(f64, f64, f64)> = (0..30)
            .map(|i| {
                let base = 100.0 + i as f64;
                (base + 1.0, base - 1.0, base)
            })
            .collect();
        let reading = calculate_dmi(&hlc(&rows), &DmiParams::default()).unwrap();
        assert_eq!(reading.mdi, 0.0);
        assert!(reading.pdi > 0.0);
        // DX is pinned at 100, so the smoothed ADX sits at 100
        assert!((reading.adx - 100.0).abs() < 1e-9);
    }

    #[test]
    fn dmi_rally_after_chop_is_a_buy() {
        let reading = calculate_dmi(&chop_then_rally(), &DmiParams::default()).unwrap();
        assert!(reading.fast_adx > 25.0);
        assert!(reading.pdi > reading.mdi);
        assert!(matches!(
            reading.trend_health,
            TrendHealth::Strengthening | TrendHealth::PowerTrend
        ));
        assert_eq!(reading.signal, DmiSignal::Buy);
    }

    #[test]
    fn uninterrupted_rally_saturates_adx() {
        // -DM never fires, so DX is 100 on every bar and ADX cannot rise
        let rows: Vec<(f64, f64, f64)> = (0..60)
            .map(|i| {
                let i = i as f64;
                let base = 100.0 + i * (1.0 + i * 0.1);
                let half_range = 1.0 + i * 0.05;
                (base + half_range, base - half_range, base + half_range * 0.5)
            })
            .collect();
        let reading = calculate_dmi(&hlc(&rows), &DmiParams::default()).unwrap();
        assert_eq!(reading.mdi, 0.0);
        assert_eq!(reading.adx, 100.0);
        assert_eq!(reading.fast_adx, 100.0);
        assert_eq!(reading.trend_health, TrendHealth::Exhausting);
        assert_eq!(reading.signal, DmiSignal::NoSignal);
    }

    #[test]
    fn dmi_decline_after_chop_is_a_sell() {
        let mirrored: Vec<Candle> = chop_then_rally()
            .into_iter()
            .map(|c| Candle {
                open: 300.0 - c.open,
                high: 300.0 - c.low,
                low: 300.0 - c.high,
                close: 300.0 - c.close,
                ..c
            })
            .collect();
        let reading = calculate_dmi(&mirrored, &DmiParams::default()).unwrap();
        assert!(reading.mdi > reading.pdi);
        assert_eq!(reading.signal, DmiSignal::Sell);
    }

    #[test]
    fn dmi_zero_period() {
        let candles = hlc(&vec![(101.0, 99.0, 100.0); 30]);
        let params = DmiParams {
            fast_period: 0,
            slow_period: 5,
        };
        assert!(matches!(
            calculate_dmi(&candles, &params),
            Err(IndicatorError::InvalidPeriod { .. })
        ));
    }
}
