//! Aggregation of a daily candle series into weekly and monthly series.
//!
//! Weekly buckets are keyed by ISO-8601 week (year of the week's Thursday),
//! monthly buckets by calendar (year, month). Buckets are emitted in the
//! order they are first encountered; the input is never re-sorted.

use crate::domain::ohlcv::Candle;
use chrono::Datelike;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Weekly,
    Monthly,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Weekly => write!(f, "weekly"),
            Granularity::Monthly => write!(f, "monthly"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BucketKey(i32, u32);

fn bucket_key(candle: &Candle, granularity: Granularity) -> BucketKey {
    match granularity {
        Granularity::Weekly => {
            let week = candle.date.iso_week();
            BucketKey(week.year(), week.week())
        }
        Granularity::Monthly => BucketKey(candle.date.year(), candle.date.month()),
    }
}

/// Collapse `daily` into one candle per bucket.
///
/// open = first open, close = last close, high/low = bucket extrema,
/// volume = sum. The bucket candle carries the date of its first daily candle.
pub fn aggregate(daily: &[Candle], granularity: Granularity) -> Vec<Candle> {
    let mut aggregated: Vec<Candle> = Vec::new();
    let mut current: Option<(BucketKey, Candle)> = None;

    for candle in daily {
        let key = bucket_key(candle, granularity);
        match current.as_mut() {
            Some((current_key, agg)) if *current_key == key => {
                agg.close = candle.close;
                agg.high = agg.high.max(candle.high);
                agg.low = agg.low.min(candle.low);
                agg.volume += candle.volume;
            }
            _ => {
                if let Some((_, done)) = current.take() {
                    aggregated.push(done);
                }
                current = Some((key, candle.clone()));
            }
        }
    }

    if let Some((_, done)) = current {
        aggregated.push(done);
    }
    aggregated
}
