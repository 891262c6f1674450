//! CSV file market-data adapter.
//!
//! One file per ticker at `<base>/<TICKER>.csv` with the header
//! `date,open,high,low,close,volume`. Rows with a missing or non-positive
//! price are incomplete quotes and are dropped.

use crate::domain::error::TrendscanError;
use crate::domain::ohlcv::Candle;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

pub struct CsvAdapter {
    base_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct QuoteRow {
    date: String,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    volume: Option<f64>,
}

impl QuoteRow {
    fn into_candle(self) -> Option<Candle> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()?;
        let positive = |v: Option<f64>| v.filter(|p| p.is_finite() && *p > 0.0);
        Some(Candle {
            date,
            open: positive(self.open)?,
            high: positive(self.high)?,
            low: positive(self.low)?,
            close: positive(self.close)?,
            volume: self
                .volume
                .filter(|v| v.is_finite() && *v > 0.0)
                .map(|v| v.round() as u64)
                .unwrap_or(0),
        })
    }
}

impl CsvAdapter {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_candles(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Candle>, TrendscanError> {
        let path = self.csv_path(ticker);
        let unavailable = |reason: String| TrendscanError::DataUnavailable {
            ticker: ticker.to_string(),
            reason,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|e| unavailable(format!("failed to read {}: {}", path.display(), e)))?;

        let mut candles = Vec::new();
        let mut dropped = 0usize;
        for row in rdr.deserialize::<QuoteRow>() {
            let row = row.map_err(|e| unavailable(format!("CSV parse error: {}", e)))?;
            match row.into_candle() {
                Some(c) if c.date >= start && c.date <= end => candles.push(c),
                Some(_) => {}
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!(ticker, dropped, "dropped incomplete quote rows");
        }
        if candles.is_empty() {
            return Err(unavailable(format!("no quotes between {} and {}", start, end)));
        }

        candles.sort_by_key(|c| c.date);
        candles.dedup_by_key(|c| c.date);
        Ok(candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup(content: &str) -> (TempDir, CsvAdapter) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ABB.ST.csv"), content).unwrap();
        let adapter = CsvAdapter::new(dir.path());
        (dir, adapter)
    }

    #[test]
    fn reads_and_sorts_candles() {
        let (_dir, adapter) = setup(
            "date,open,high,low,close,volume\n\
             2024-01-16,105.0,115.0,100.0,110.0,60000\n\
             2024-01-15,100.0,110.0,90.0,105.0,50000\n\
             2024-01-17,110.0,120.0,105.0,115.0,55000\n",
        );
        let candles = adapter
            .fetch_candles("ABB.ST", date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();
        assert_eq!(candles.len(), 3);
        assert_eq!(candles[0].date, date(2024, 1, 15));
        assert_eq!(candles[0].open, 100.0);
        assert_eq!(candles[0].high, 110.0);
        assert_eq!(candles[0].low, 90.0);
        assert_eq!(candles[0].close, 105.0);
        assert_eq!(candles[0].volume, 50000);
        assert_eq!(candles[2].date, date(2024, 1, 17));
    }

    #[test]
    fn filters_by_date_range() {
        let (_dir, adapter) = setup(
            "date,open,high,low,close,volume\n\
             2024-01-15,100,110,90,105,1\n\
             2024-01-16,105,115,100,110,1\n\
             2024-01-17,110,120,105,115,1\n",
        );
        let candles = adapter
            .fetch_candles("ABB.ST", date(2024, 1, 16), date(2024, 1, 16))
            .unwrap();
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].close, 110.0);
    }

    #[test]
    fn drops_incomplete_quotes() {
        let (_dir, adapter) = setup(
            "date,open,high,low,close,volume\n\
             2024-01-15,100,110,90,105,1000\n\
             2024-01-16,,115,100,110,1000\n\
             2024-01-17,110,120,105,0,1000\n\
             2024-01-18,110,120,105,115,\n",
        );
        let candles = adapter
            .fetch_candles("ABB.ST", date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1].date, date(2024, 1, 18));
        assert_eq!(candles[1].volume, 0);
    }

    #[test]
    fn fractional_volume_is_rounded() {
        let (_dir, adapter) = setup("date,open,high,low,close,volume\n2024-01-15,1,2,1,2,1234.6\n");
        let candles = adapter
            .fetch_candles("ABB.ST", date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();
        assert_eq!(candles[0].volume, 1235);
    }

    #[test]
    fn missing_file_is_unavailable() {
        let (_dir, adapter) = setup("date,open,high,low,close,volume\n");
        let err = adapter
            .fetch_candles("NOPE.ST", date(2024, 1, 1), date(2024, 1, 31))
            .unwrap_err();
        assert!(matches!(err, TrendscanError::DataUnavailable { ticker, .. } if ticker == "NOPE.ST"));
    }

    #[test]
    fn empty_range_is_unavailable() {
        let (_dir, adapter) = setup("date,open,high,low,close,volume\n2024-01-15,1,2,1,2,3\n");
        let err = adapter
            .fetch_candles("ABB.ST", date(2023, 1, 1), date(2023, 12, 31))
            .unwrap_err();
        assert!(err.is_skippable());
    }
}
