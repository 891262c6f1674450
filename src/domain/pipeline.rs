//! Single-ticker analysis pipeline.
//!
//! Daily candles in, one [`ReportRecord`] out. The as-of date is the date of
//! the last candle. Any required indicator that lacks history fails the whole
//! ticker; no partially filled record is ever produced.

use crate::domain::advisor::{advise, AdvisorInput};
use crate::domain::config::AnalysisConfig;
use crate::domain::confirmation::confirmation_metrics;
use crate::domain::error::TrendscanError;
use crate::domain::indicator::activity::{average_spread, average_volume, SurgeFlag};
use crate::domain::indicator::atr::calculate_atr;
use crate::domain::indicator::bollinger::calculate_bollinger;
use crate::domain::indicator::mfi::calculate_mfi;
use crate::domain::indicator::rsi::latest_rsi;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::indicator::supertrend::calculate_supertrend;
use crate::domain::indicator::swing::calculate_swing_levels;
use crate::domain::indicator::IndicatorError;
use crate::domain::ohlcv::Candle;
use crate::domain::report::{
    band_distance_pct, MovingAverages, PriceTrend, ReportRecord, RsiReadings, SurgeFlags,
};
use crate::domain::sizing::{plan_trade, ENTRY_OFFSET};
use crate::domain::timeframe::{aggregate, Granularity};
use crate::domain::trend::{multi_timeframe_dmi, MIN_DMI_DAILY_CANDLES};
use crate::domain::universe::Ticker;
use tracing::debug;

const SPREAD_SHORT: usize = 10;
const VOLUME_SHORT: usize = 15;
const SURGE_LONG: usize = 50;

pub fn analyze(
    ticker: &Ticker,
    daily: &[Candle],
    config: &AnalysisConfig,
) -> Result<ReportRecord, TrendscanError> {
    let insufficient = |minimum: usize| TrendscanError::InsufficientData {
        ticker: ticker.symbol.clone(),
        bars: daily.len(),
        minimum,
    };
    let indicator = |source: IndicatorError| TrendscanError::Indicator {
        ticker: ticker.symbol.clone(),
        source,
    };

    if daily.len() < config.min_history {
        return Err(insufficient(config.min_history));
    }
    let Some(current) = daily.last() else {
        return Err(insufficient(config.min_history.max(1)));
    };

    let weekly = aggregate(daily, Granularity::Weekly);
    let monthly = aggregate(daily, Granularity::Monthly);
    debug!(
        ticker = %ticker.symbol,
        daily = daily.len(),
        weekly = weekly.len(),
        monthly = monthly.len(),
        "aggregated timeframes"
    );

    let bollinger = calculate_bollinger(daily, config.bollinger_period, config.bollinger_mult_x100)
        .map_err(indicator)?;
    let atr = calculate_atr(daily, config.atr_period).map_err(indicator)?;
    let supertrend = calculate_supertrend(
        daily,
        config.supertrend_atr_period,
        config.supertrend_multiplier,
    )
    .map_err(indicator)?;
    let mfi = calculate_mfi(daily, config.mfi_period).map_err(indicator)?;
    let swing = calculate_swing_levels(daily, config.swing_period).map_err(indicator)?;

    let rsi = RsiReadings {
        daily: latest_rsi(daily, config.rsi_period).map_err(indicator)?,
        weekly: latest_rsi(&weekly, config.rsi_period).map_err(indicator)?,
        monthly: latest_rsi(&monthly, config.rsi_period).map_err(indicator)?,
    };

    let dmi = multi_timeframe_dmi(daily, &weekly, &monthly, &config.dmi)
        .ok_or_else(|| insufficient(config.dmi.min_history().max(MIN_DMI_DAILY_CANDLES)))?;

    let sma = MovingAverages {
        sma20: calculate_sma(daily, 20).map_err(indicator)?,
        sma50: calculate_sma(daily, 50).map_err(indicator)?,
        sma150: calculate_sma(daily, 150).map_err(indicator)?,
    };
    let price_trend = PriceTrend::classify(current.close, sma.sma20, sma.sma50, sma.sma150);

    let confirmation = confirmation_metrics(daily).map_err(indicator)?;

    let state = advise(&AdvisorInput {
        daily_rsi: rsi.daily,
        weekly_rsi: rsi.weekly,
        monthly_rsi: rsi.monthly,
        vol_ratio: confirmation.vol_ratio,
        price_above_sma50: confirmation.price_above_sma50,
    });

    let plan = plan_trade(daily, atr, config.risk_capital())
        .ok_or_else(|| insufficient(ENTRY_OFFSET + 1))?;

    let spread = current.spread();
    let volume = current.volume as f64;
    let surges = SurgeFlags {
        spread_short: SurgeFlag::from_ratio(
            spread,
            average_spread(daily, SPREAD_SHORT).map_err(indicator)?,
        ),
        spread_long: SurgeFlag::from_ratio(
            spread,
            average_spread(daily, SURGE_LONG).map_err(indicator)?,
        ),
        volume_short: SurgeFlag::from_ratio(
            volume,
            average_volume(daily, VOLUME_SHORT).map_err(indicator)?,
        ),
        volume_long: SurgeFlag::from_ratio(
            volume,
            average_volume(daily, SURGE_LONG).map_err(indicator)?,
        ),
    };

    debug!(
        ticker = %ticker.symbol,
        date = %current.date,
        state = %state,
        signal = %dmi.daily.signal,
        "analysis complete"
    );

    Ok(ReportRecord {
        date: current.date,
        ticker: ticker.symbol.clone(),
        name: ticker.name.clone(),
        close: current.close,
        diff_bb_low_pct: band_distance_pct(current.close, bollinger.lower),
        diff_bb_high_pct: band_distance_pct(current.close, bollinger.upper),
        bollinger,
        atr,
        supertrend,
        mfi,
        swing,
        rsi,
        dmi,
        sma,
        price_trend,
        vol_ratio: confirmation.vol_ratio,
        price_above_sma50: confirmation.price_above_sma50,
        state,
        plan,
        surges,
    })
}
