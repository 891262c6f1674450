//! Market-data provider port.

use crate::domain::error::TrendscanError;
use crate::domain::ohlcv::Candle;
use chrono::NaiveDate;

pub trait DataPort {
    /// Daily candles for `ticker` within `[start, end]`, sorted by date.
    ///
    /// A provider that has nothing for the ticker returns
    /// [`TrendscanError::DataUnavailable`].
    fn fetch_candles(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Candle>, TrendscanError>;
}
