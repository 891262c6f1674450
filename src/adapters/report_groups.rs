//! Column groups shared by the console tables and the per-group detail CSVs.
//!
//! Each group is a titled subset of a [`ReportRecord`] rendered as strings,
//! prices with two decimals.

use crate::domain::report::ReportRecord;

pub struct ReportGroup {
    pub title: &'static str,
    pub columns: &'static [&'static str],
    cells: fn(&ReportRecord) -> Vec<String>,
}

impl ReportGroup {
    pub fn cells(&self, record: &ReportRecord) -> Vec<String> {
        (self.cells)(record)
    }

    /// Title with whitespace runs replaced by `_`, for file names.
    pub fn file_title(&self) -> String {
        self.title.split_whitespace().collect::<Vec<_>>().join("_")
    }
}

fn fmt2(value: f64) -> String {
    format!("{:.2}", value)
}

fn technical_cells(r: &ReportRecord) -> Vec<String> {
    vec![
        r.date.to_string(),
        r.ticker.clone(),
        fmt2(r.close),
        fmt2(r.bollinger.upper),
        fmt2(r.bollinger.lower),
        fmt2(r.supertrend.value),
        fmt2(r.atr),
        fmt2(r.rsi.daily),
        fmt2(r.rsi.weekly),
        fmt2(r.rsi.monthly),
        fmt2(r.swing.high),
        fmt2(r.swing.low),
        fmt2(r.sma.sma20),
        fmt2(r.sma.sma50),
        fmt2(r.sma.sma150),
    ]
}

fn trend_vsa_cells(r: &ReportRecord) -> Vec<String> {
    vec![
        r.date.to_string(),
        r.ticker.clone(),
        fmt2(r.close),
        fmt2(r.diff_bb_low_pct),
        fmt2(r.diff_bb_high_pct),
        r.surges.spread_short.to_string(),
        r.surges.spread_long.to_string(),
        r.surges.volume_short.to_string(),
        r.surges.volume_long.to_string(),
    ]
}

fn entry_cells(r: &ReportRecord) -> Vec<String> {
    vec![
        r.date.to_string(),
        r.ticker.clone(),
        fmt2(r.plan.entry),
        fmt2(r.plan.target),
        fmt2(r.plan.stop),
        r.plan.shares.to_string(),
        fmt2(r.dmi.daily.adx),
        fmt2(r.dmi.daily.pdi),
        fmt2(r.dmi.daily.mdi),
        r.dmi.daily.signal.to_string(),
        r.action().to_string(),
        r.price_trend.to_string(),
    ]
}

pub const REPORT_GROUPS: [ReportGroup; 3] = [
    ReportGroup {
        title: "Technical Indicators",
        columns: &[
            "Date", "Ticker", "Close", "BBHigh", "BBLow", "Supertrend", "ATR", "RsiD", "RsiW",
            "RsiM", "SwingHigh", "SwingLow", "Sma20", "Sma50", "Sma150",
        ],
        cells: technical_cells,
    },
    ReportGroup {
        title: "Trend & VSA Analysis",
        columns: &[
            "Date",
            "Ticker",
            "Close",
            "Diff_BBLow_%",
            "Diff_BBHigh_%",
            "VsaDPrice",
            "VsaWPrice",
            "VsaDVol",
            "VsaWVol",
        ],
        cells: trend_vsa_cells,
    },
    ReportGroup {
        title: "Entry Target & SL",
        columns: &[
            "Date",
            "Ticker",
            "Entry",
            "Target",
            "StopLoss",
            "Shares",
            "AdxD",
            "PdiD",
            "MdiD",
            "DmiSignal",
            "RSITrend",
            "PriceTrend",
        ],
        cells: entry_cells,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::test_support::sample_record;
    use chrono::NaiveDate;

    #[test]
    fn every_group_fills_its_columns() {
        let record = sample_record("ABB.ST", NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        for group in &REPORT_GROUPS {
            let cells = group.cells(&record);
            assert_eq!(cells.len(), group.columns.len(), "{}", group.title);
            assert_eq!(group.columns[..2], ["Date", "Ticker"]);
            assert_eq!(cells[0], "2024-05-02");
            assert_eq!(cells[1], "ABB.ST");
        }
    }

    #[test]
    fn cell_values() {
        let record = sample_record("ABB.ST", NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        let technical = REPORT_GROUPS[0].cells(&record);
        assert_eq!(technical[2], "101.26");
        assert_eq!(technical[5], "95.00");

        let vsa = REPORT_GROUPS[1].cells(&record);
        assert_eq!(vsa[3], "12.51");
        assert_eq!(vsa[4], "-7.95");
        assert_eq!(vsa[5..], ["High", "Neutral", "Neutral", "High"]);

        let entry = REPORT_GROUPS[2].cells(&record);
        assert_eq!(entry[5], "40");
        assert_eq!(entry[9], "BUY");
        assert_eq!(entry[10], "STRONG BUY / HOLD");
    }

    #[test]
    fn file_titles() {
        let titles: Vec<String> = REPORT_GROUPS.iter().map(ReportGroup::file_title).collect();
        assert_eq!(
            titles,
            vec!["Technical_Indicators", "Trend_&_VSA_Analysis", "Entry_Target_&_SL"]
        );
    }
}
