//! Console tables on stdout: one per report group, then a summary.
//!
//! Column widths fit the widest cell. Columns whose cells are all numbers are
//! right aligned.

use crate::adapters::report_groups::REPORT_GROUPS;
use crate::domain::error::TrendscanError;
use crate::domain::report::ReportRecord;
use crate::ports::report_port::ReportPort;
use std::fmt::Write as _;
use std::io::Write as _;

#[derive(Debug, Default)]
pub struct ConsoleReport;

const SUMMARY_HEADER: [&str; 15] = [
    "Date", "Ticker", "Close", "RSI D", "RSI W", "RSI M", "ADX", "+DI", "-DI", "DMI", "Action",
    "Entry", "Stop", "Target", "Shares",
];

fn summary_cells(r: &ReportRecord) -> Vec<String> {
    vec![
        r.date.to_string(),
        r.ticker.clone(),
        format!("{:.2}", r.close),
        format!("{:.1}", r.rsi.daily),
        format!("{:.1}", r.rsi.weekly),
        format!("{:.1}", r.rsi.monthly),
        format!("{:.1}", r.dmi.daily.adx),
        format!("{:.1}", r.dmi.daily.pdi),
        format!("{:.1}", r.dmi.daily.mdi),
        r.dmi.daily.signal.to_string(),
        r.action().to_string(),
        format!("{:.2}", r.plan.entry),
        format!("{:.2}", r.plan.stop),
        format!("{:.2}", r.plan.target),
        r.plan.shares.to_string(),
    ]
}

fn is_numeric_column(rows: &[Vec<String>], col: usize) -> bool {
    let mut cells = rows
        .iter()
        .map(|row| row[col].as_str())
        .filter(|c| !c.is_empty())
        .peekable();
    cells.peek().is_some() && cells.all(|c| c.parse::<f64>().is_ok())
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize], numeric: &[bool]) -> String {
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push(' ');
        }
        let width = widths[i];
        if numeric[i] {
            let _ = write!(line, "{:>width$}", cell);
        } else {
            let _ = write!(line, "{:<width$}", cell);
        }
    }
    line.trim_end().to_string()
}

fn render_table(out: &mut String, title: &str, header: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }
    let numeric: Vec<bool> = (0..header.len())
        .map(|col| is_numeric_column(rows, col))
        .collect();

    let header_line = format_row(header.iter().copied(), &widths, &numeric);
    let _ = writeln!(out, "--- {} ---", title);
    let _ = writeln!(out, "{}", header_line);
    let _ = writeln!(out, "{}", "-".repeat(header_line.len()));
    for row in rows {
        let _ = writeln!(out, "{}", format_row(row.iter().map(String::as_str), &widths, &numeric));
    }
}

impl ConsoleReport {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, records: &[ReportRecord]) -> String {
        let mut out = String::new();
        for (index, group) in REPORT_GROUPS.iter().enumerate() {
            let rows: Vec<Vec<String>> = records.iter().map(|r| group.cells(r)).collect();
            let title = format!("Group {}: {}", index + 1, group.title);
            render_table(&mut out, &title, group.columns, &rows);
            out.push('\n');
        }
        let rows: Vec<Vec<String>> = records.iter().map(summary_cells).collect();
        render_table(&mut out, "Summary", &SUMMARY_HEADER, &rows);
        out
    }
}

impl ReportPort for ConsoleReport {
    fn write(&self, records: &[ReportRecord]) -> Result<(), TrendscanError> {
        let mut stdout = std::io::stdout().lock();
        if records.is_empty() {
            writeln!(stdout, "No records to report.")?;
            return Ok(());
        }
        stdout.write_all(self.render(records).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::test_support::sample_record;
    use chrono::NaiveDate;

    fn rendered() -> String {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        ConsoleReport::new().render(&[
            sample_record("ABB.ST", date),
            sample_record("VOLV-B.ST", date),
        ])
    }

    /// Lines of the table whose title line contains `title`.
    fn section(text: &str, title: &str) -> Vec<String> {
        text.lines()
            .skip_while(|l| !(l.starts_with("---") && l.contains(title)))
            .skip(1)
            .take_while(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn groups_render_in_order_before_summary() {
        let text = rendered();
        let titles: Vec<&str> = text.lines().filter(|l| l.starts_with("--- ")).collect();
        assert_eq!(
            titles,
            vec![
                "--- Group 1: Technical Indicators ---",
                "--- Group 2: Trend & VSA Analysis ---",
                "--- Group 3: Entry Target & SL ---",
                "--- Summary ---",
            ]
        );
    }

    #[test]
    fn technical_group_carries_bands_and_averages() {
        let lines = section(&rendered(), "Technical Indicators");
        assert_eq!(lines.len(), 4);
        for header in ["BBHigh", "BBLow", "Supertrend", "SwingHigh", "Sma150"] {
            assert!(lines[0].contains(header), "missing {header}");
        }
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].starts_with("2024-05-02 ABB.ST"));
        assert!(lines[2].contains("110.00"));
        assert!(lines[2].ends_with("90.00"));
        assert!(lines[3].contains("VOLV-B.ST"));
    }

    #[test]
    fn vsa_group_shows_surge_flags() {
        let lines = section(&rendered(), "Trend & VSA Analysis");
        assert!(lines[0].contains("VsaDPrice"));
        assert!(lines[2].contains("-7.95"));
        assert!(lines[2].ends_with("High"));
    }

    #[test]
    fn summary_rows() {
        let lines = section(&rendered(), "Summary");
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Date"));
        assert!(lines[2].starts_with("2024-05-02 ABB.ST"));
        assert!(lines[2].contains("101.26"));
        assert!(lines[2].contains("STRONG BUY / HOLD"));
        assert!(lines[2].ends_with("40"));
    }

    #[test]
    fn numeric_columns_line_up() {
        let lines = section(&rendered(), "Summary");
        // Shares is right aligned, so every row ends at the header's edge
        assert_eq!(lines[0].len(), lines[2].len());
        assert_eq!(lines[2].len(), lines[3].len());
    }
}
