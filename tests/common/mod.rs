#![allow(dead_code)]

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashMap;
pub use trendscan::domain::error::TrendscanError;
pub use trendscan::domain::ohlcv::Candle;
use trendscan::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Candle>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_candles(mut self, ticker: &str, candles: Vec<Candle>) -> Self {
        self.data.insert(ticker.to_string(), candles);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_candles(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Candle>, TrendscanError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(TrendscanError::DataUnavailable {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        let candles: Vec<Candle> = self
            .data
            .get(ticker)
            .map(|c| {
                c.iter()
                    .filter(|c| c.date >= start && c.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if candles.is_empty() {
            return Err(TrendscanError::DataUnavailable {
                ticker: ticker.to_string(),
                reason: "no quotes".to_string(),
            });
        }
        Ok(candles)
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// First `n` weekdays starting at `start`.
pub fn trading_days(start: NaiveDate, n: usize) -> Vec<NaiveDate> {
    start
        .iter_days()
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .take(n)
        .collect()
}

/// Weekday candles from 2022-01-03 following `close(i)`, each with a
/// 2.4-wide range around the close.
pub fn candles_from(n: usize, close: impl Fn(usize) -> f64) -> Vec<Candle> {
    trading_days(date("2022-01-03"), n)
        .into_iter()
        .enumerate()
        .map(|(i, d)| {
            let c = close(i);
            Candle {
                date: d,
                open: c - 0.3,
                high: c + 1.2,
                low: c - 1.2,
                close: c,
                volume: 100_000 + (i as u64 % 11) * 3_000,
            }
        })
        .collect()
}

/// An oscillating uptrend; 650 candles end on 2024-06-28.
pub fn oscillating_uptrend(n: usize) -> Vec<Candle> {
    candles_from(n, |i| 100.0 + i as f64 * 0.15 + (i as f64 * 0.3).sin() * 4.0)
}

pub fn steady_decline(n: usize) -> Vec<Candle> {
    candles_from(n, |i| 300.0 - i as f64 * 0.2)
}
