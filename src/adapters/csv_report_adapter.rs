//! Consolidated and per-group CSV report writer.
//!
//! Records are grouped by date and each group is written to
//! `<output_dir>/<date>_Consolidated_Report.csv`. Prices are rounded to two
//! decimals; weekly and monthly DMI columns are left empty when unavailable.
//!
//! Each column group of [`REPORT_GROUPS`] also goes to
//! `<output_dir>/details/<date>_Group_<n>_<Title>.csv` holding every record of
//! the run, dated by the latest record.

use crate::adapters::report_groups::{ReportGroup, REPORT_GROUPS};
use crate::domain::error::TrendscanError;
use crate::domain::indicator::dmi::DmiReading;
use crate::domain::report::ReportRecord;
use crate::ports::report_port::ReportPort;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct CsvReportAdapter {
    output_dir: PathBuf,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConsolidatedRow {
    date: String,
    ticker: String,
    name: String,
    close: f64,
    #[serde(rename = "BBHigh")]
    bb_high: f64,
    #[serde(rename = "BBMid")]
    bb_mid: f64,
    #[serde(rename = "BBLow")]
    bb_low: f64,
    supertrend: f64,
    supertrend_direction: String,
    #[serde(rename = "ATR")]
    atr: f64,
    #[serde(rename = "MFI")]
    mfi: f64,
    rsi_d: f64,
    rsi_w: f64,
    rsi_m: f64,
    sma20: f64,
    sma50: f64,
    sma150: f64,
    swing_high: f64,
    swing_low: f64,
    #[serde(rename = "Diff_BBLow_%")]
    diff_bb_low_pct: f64,
    #[serde(rename = "Diff_BBHigh_%")]
    diff_bb_high_pct: f64,
    vol_ratio: f64,
    above_sma50: bool,
    vsa_d_price: String,
    vsa_w_price: String,
    vsa_d_vol: String,
    vsa_w_vol: String,
    status: String,
    #[serde(rename = "RSITrend")]
    rsi_trend: String,
    confidence: String,
    price_trend: String,
    entry: f64,
    target: f64,
    stop_loss: f64,
    shares: u64,
    #[serde(rename = "Adx_D")]
    adx_d: f64,
    #[serde(rename = "Pdi_D")]
    pdi_d: f64,
    #[serde(rename = "Mdi_D")]
    mdi_d: f64,
    #[serde(rename = "TrendHealth_D")]
    trend_health_d: String,
    #[serde(rename = "Market_Decision")]
    market_decision: String,
    #[serde(rename = "Adx_W")]
    adx_w: Option<f64>,
    #[serde(rename = "Pdi_W")]
    pdi_w: Option<f64>,
    #[serde(rename = "Mdi_W")]
    mdi_w: Option<f64>,
    #[serde(rename = "Adx_M")]
    adx_m: Option<f64>,
    #[serde(rename = "Pdi_M")]
    pdi_m: Option<f64>,
    #[serde(rename = "Mdi_M")]
    mdi_m: Option<f64>,
}

impl From<&ReportRecord> for ConsolidatedRow {
    fn from(r: &ReportRecord) -> Self {
        let adx = |d: &Option<DmiReading>| d.map(|d| round2(d.adx));
        let pdi = |d: &Option<DmiReading>| d.map(|d| round2(d.pdi));
        let mdi = |d: &Option<DmiReading>| d.map(|d| round2(d.mdi));

        Self {
            date: r.date.to_string(),
            ticker: r.ticker.clone(),
            name: r.name.clone(),
            close: round2(r.close),
            bb_high: round2(r.bollinger.upper),
            bb_mid: round2(r.bollinger.mid),
            bb_low: round2(r.bollinger.lower),
            supertrend: round2(r.supertrend.value),
            supertrend_direction: r.supertrend.direction.to_string(),
            atr: round2(r.atr),
            mfi: round2(r.mfi),
            rsi_d: round2(r.rsi.daily),
            rsi_w: round2(r.rsi.weekly),
            rsi_m: round2(r.rsi.monthly),
            sma20: round2(r.sma.sma20),
            sma50: round2(r.sma.sma50),
            sma150: round2(r.sma.sma150),
            swing_high: round2(r.swing.high),
            swing_low: round2(r.swing.low),
            diff_bb_low_pct: round2(r.diff_bb_low_pct),
            diff_bb_high_pct: round2(r.diff_bb_high_pct),
            vol_ratio: round2(r.vol_ratio),
            above_sma50: r.price_above_sma50,
            vsa_d_price: r.surges.spread_short.to_string(),
            vsa_w_price: r.surges.spread_long.to_string(),
            vsa_d_vol: r.surges.volume_short.to_string(),
            vsa_w_vol: r.surges.volume_long.to_string(),
            status: r.state.to_string(),
            rsi_trend: r.action().to_string(),
            confidence: r.confidence().to_string(),
            price_trend: r.price_trend.to_string(),
            entry: round2(r.plan.entry),
            target: round2(r.plan.target),
            stop_loss: round2(r.plan.stop),
            shares: r.plan.shares,
            adx_d: round2(r.dmi.daily.adx),
            pdi_d: round2(r.dmi.daily.pdi),
            mdi_d: round2(r.dmi.daily.mdi),
            trend_health_d: r.dmi.daily.trend_health.to_string(),
            market_decision: r.dmi.daily.signal.to_string(),
            adx_w: adx(&r.dmi.weekly),
            pdi_w: pdi(&r.dmi.weekly),
            mdi_w: mdi(&r.dmi.weekly),
            adx_m: adx(&r.dmi.monthly),
            pdi_m: pdi(&r.dmi.monthly),
            mdi_m: mdi(&r.dmi.monthly),
        }
    }
}

impl CsvReportAdapter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn report_path(&self, date: NaiveDate) -> PathBuf {
        self.output_dir
            .join(format!("{}_Consolidated_Report.csv", date))
    }

    pub fn details_dir(&self) -> PathBuf {
        self.output_dir.join("details")
    }

    /// Detail file for the 1-based group `number`.
    pub fn detail_path(&self, date: NaiveDate, number: usize, group: &ReportGroup) -> PathBuf {
        self.details_dir().join(format!(
            "{}_Group_{}_{}.csv",
            date,
            number,
            group.file_title()
        ))
    }

    fn write_detail(
        &self,
        path: &Path,
        group: &ReportGroup,
        records: &[ReportRecord],
    ) -> Result<(), TrendscanError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(group.columns)?;
        for record in records {
            writer.write_record(group.cells(record))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_group(&self, path: &Path, records: &[&ReportRecord]) -> Result<(), TrendscanError> {
        let mut writer = csv::Writer::from_path(path)?;
        for record in records {
            writer.serialize(ConsolidatedRow::from(*record))?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, records: &[ReportRecord]) -> Result<(), TrendscanError> {
        if records.is_empty() {
            return Ok(());
        }
        let details = self.details_dir();
        fs::create_dir_all(&details).map_err(|e| TrendscanError::Report {
            reason: format!(
                "cannot create output directory {}: {}",
                details.display(),
                e
            ),
        })?;

        let mut by_date: BTreeMap<NaiveDate, Vec<&ReportRecord>> = BTreeMap::new();
        for record in records {
            by_date.entry(record.date).or_default().push(record);
        }

        for (date, group) in &by_date {
            let path = self.report_path(*date);
            self.write_group(&path, group)?;
            info!(path = %path.display(), entries = group.len(), "report saved");
        }

        if let Some(&latest) = by_date.keys().next_back() {
            for (index, group) in REPORT_GROUPS.iter().enumerate() {
                let path = self.detail_path(latest, index + 1, group);
                self.write_detail(&path, group, records)?;
            }
            info!(dir = %details.display(), groups = REPORT_GROUPS.len(), "detail reports saved");
        }
        Ok(())
    }
}
