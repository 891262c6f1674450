//! Scan orchestration: which dates to analyse, fetching history per ticker,
//! and running the pipeline over every (ticker, date) pair.
//!
//! Fetching is sequential; analysis of the fetched series runs on the rayon
//! pool since tickers share no state. A ticker that cannot be fetched or
//! analysed is skipped with a warning and never aborts the rest of the scan.

use crate::domain::config::AnalysisConfig;
use crate::domain::error::TrendscanError;
use crate::domain::ohlcv::Candle;
use crate::domain::pipeline::analyze;
use crate::domain::report::ReportRecord;
use crate::domain::universe::Ticker;
use crate::ports::data_port::DataPort;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rayon::prelude::*;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    pub as_of: NaiveDate,
    pub backtest: bool,
    pub tickers: Vec<Ticker>,
}

impl ScanRequest {
    pub fn dates(&self) -> Vec<NaiveDate> {
        scan_dates(self.as_of, self.backtest)
    }
}

pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The as-of date alone, or in backtest mode every weekday from the first of
/// the as-of month through the as-of date.
pub fn scan_dates(as_of: NaiveDate, backtest: bool) -> Vec<NaiveDate> {
    if !backtest {
        return vec![as_of];
    }
    let first = as_of.with_day(1).unwrap_or(as_of);
    first
        .iter_days()
        .take_while(|d| *d <= as_of)
        .filter(|d| is_weekday(*d))
        .collect()
}

/// One unit of work: a ticker's daily history ending at (or before) `as_of`.
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    pub ticker: Ticker,
    pub as_of: NaiveDate,
    pub candles: Vec<Candle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedTicker {
    pub ticker: String,
    pub as_of: NaiveDate,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub records: Vec<ReportRecord>,
    pub skipped: Vec<SkippedTicker>,
}

fn skip(ticker: &Ticker, as_of: NaiveDate, err: &TrendscanError) -> SkippedTicker {
    warn!(ticker = %ticker.symbol, %as_of, error = %err, "skipping ticker");
    SkippedTicker {
        ticker: ticker.symbol.clone(),
        as_of,
        reason: err.to_string(),
    }
}

/// Analyse every job in parallel. Records come back sorted by (date, ticker);
/// jobs whose history ends on the same candle collapse into one record.
pub fn analyze_batch(jobs: &[AnalysisJob], config: &AnalysisConfig) -> ScanOutcome {
    let results: Vec<Result<ReportRecord, SkippedTicker>> = jobs
        .par_iter()
        .map(|job| {
            analyze(&job.ticker, &job.candles, config)
                .map_err(|e| skip(&job.ticker, job.as_of, &e))
        })
        .collect();

    let mut outcome = ScanOutcome::default();
    for result in results {
        match result {
            Ok(record) => outcome.records.push(record),
            Err(skipped) => outcome.skipped.push(skipped),
        }
    }

    outcome
        .records
        .sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.ticker.cmp(&b.ticker)));
    outcome
        .records
        .dedup_by(|a, b| a.date == b.date && a.ticker == b.ticker);
    outcome
}

/// `date` minus `lookback_days`, or `ConfigInvalid` when that leaves the
/// calendar.
fn window_start(date: NaiveDate, lookback_days: i64) -> Result<NaiveDate, TrendscanError> {
    Duration::try_days(lookback_days)
        .and_then(|span| date.checked_sub_signed(span))
        .ok_or_else(|| TrendscanError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "lookback_days".to_string(),
            reason: format!("{} days before {} is out of range", lookback_days, date),
        })
}

/// Fetch each ticker once over the whole date span, cut one history per
/// as-of date, then analyse the batch.
///
/// Errors only when the data source fails in a way that is not specific to
/// one ticker, or when no ticker produced a record at all.
pub fn run_scan(
    data_port: &dyn DataPort,
    tickers: &[Ticker],
    dates: &[NaiveDate],
    config: &AnalysisConfig,
) -> Result<ScanOutcome, TrendscanError> {
    let (Some(&first), Some(&last)) = (dates.iter().min(), dates.iter().max()) else {
        return Ok(ScanOutcome::default());
    };
    let start = window_start(first, config.lookback_days)?;
    info!(
        tickers = tickers.len(),
        dates = dates.len(),
        %start,
        end = %last,
        "starting scan"
    );

    let mut jobs = Vec::with_capacity(tickers.len() * dates.len());
    let mut skipped = Vec::new();

    for ticker in tickers {
        let history = match data_port.fetch_candles(&ticker.symbol, start, last) {
            Ok(history) => history,
            Err(e) if e.is_skippable() => {
                skipped.extend(dates.iter().map(|d| skip(ticker, *d, &e)));
                continue;
            }
            Err(e) => return Err(e),
        };

        for &as_of in dates {
            let from = window_start(as_of, config.lookback_days)?;
            let candles: Vec<Candle> = history
                .iter()
                .filter(|c| c.date >= from && c.date <= as_of)
                .cloned()
                .collect();
            jobs.push(AnalysisJob {
                ticker: ticker.clone(),
                as_of,
                candles,
            });
        }
    }

    let mut outcome = analyze_batch(&jobs, config);
    skipped.append(&mut outcome.skipped);
    outcome.skipped = skipped;

    if outcome.records.is_empty() && !tickers.is_empty() {
        return Err(TrendscanError::DataUnavailable {
            ticker: "all".to_string(),
            reason: format!("all {} tickers were skipped", tickers.len()),
        });
    }

    info!(
        records = outcome.records.len(),
        skipped = outcome.skipped.len(),
        "scan complete"
    );
    Ok(outcome)
}
