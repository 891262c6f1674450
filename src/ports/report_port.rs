//! Report sink port.

use crate::domain::error::TrendscanError;
use crate::domain::report::ReportRecord;

/// Port for persisting or displaying analysis records.
///
/// Records arrive sorted by date; grouping and formatting are the sink's job.
pub trait ReportPort {
    fn write(&self, records: &[ReportRecord]) -> Result<(), TrendscanError>;
}
