//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use crate::adapters::console_report::ConsoleReport;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config::AnalysisConfig;
use crate::domain::config_validation::{validate_analysis_config, validate_scan_config};
use crate::domain::error::TrendscanError;
use crate::domain::scan::{is_weekday, run_scan, ScanOutcome, ScanRequest};
use crate::domain::universe::{default_tickers, parse_tickers, Ticker};
use crate::logging::init_logging;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_OUTPUT_DIR: &str = "reports";

#[derive(Parser, Debug)]
#[command(name = "trendscan", about = "Multi-timeframe technical analysis scanner")]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG applies when unset
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyse tickers as of a date and write the consolidated report
    Scan {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory holding <TICKER>.csv quote files
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// As-of date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Analyse every weekday from the first of the month through the as-of date
        #[arg(long)]
        backtest: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Tickers as SYMBOL or SYMBOL:Name
        tickers: Vec<String>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Command::Scan {
            config,
            data,
            date,
            backtest,
            output,
            tickers,
        } => run_scan_command(
            config.as_deref(),
            data.as_deref(),
            date,
            backtest,
            output.as_deref(),
            &tickers,
        ),
        Command::Validate { config } => run_validate(&config),
    }
}

fn fail(err: TrendscanError) -> ExitCode {
    error!("{err}");
    ExitCode::from(&err)
}

pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, TrendscanError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            FileConfigAdapter::from_file(path)
        }
        None => FileConfigAdapter::from_string(""),
    }
}

/// CLI tickers win over `[scan] tickers`, which win over the default universe.
pub fn resolve_tickers(
    args: &[String],
    config: &dyn ConfigPort,
) -> Result<Vec<Ticker>, TrendscanError> {
    let (list, key) = if !args.is_empty() {
        (args.join(","), "command line")
    } else if let Some(list) = config.get_string("scan", "tickers") {
        (list, "tickers")
    } else {
        return Ok(default_tickers());
    };

    parse_tickers(&list).map_err(|e| TrendscanError::ConfigInvalid {
        section: "scan".to_string(),
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Markets are closed on weekends, so a weekend as-of date is rejected.
pub fn resolve_as_of(
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<NaiveDate, TrendscanError> {
    let as_of = date.unwrap_or(today);
    if !is_weekday(as_of) {
        return Err(TrendscanError::ConfigInvalid {
            section: "scan".to_string(),
            key: "date".to_string(),
            reason: format!("{} is a weekend; the stock market is closed", as_of),
        });
    }
    Ok(as_of)
}

pub fn build_scan_request(
    date: Option<NaiveDate>,
    today: NaiveDate,
    backtest: bool,
    ticker_args: &[String],
    config: &dyn ConfigPort,
) -> Result<ScanRequest, TrendscanError> {
    Ok(ScanRequest {
        as_of: resolve_as_of(date, today)?,
        backtest: backtest || config.get_bool("scan", "backtest", false),
        tickers: resolve_tickers(ticker_args, config)?,
    })
}

pub fn resolve_dir(
    flag: Option<&Path>,
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: &str,
) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| config.get_string(section, key).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Scan, then hand the sorted records to every sink.
pub fn execute_scan(
    data_port: &dyn DataPort,
    sinks: &[&dyn ReportPort],
    request: &ScanRequest,
    config: &AnalysisConfig,
) -> Result<ScanOutcome, TrendscanError> {
    let dates = request.dates();
    let outcome = run_scan(data_port, &request.tickers, &dates, config)?;
    for sink in sinks {
        sink.write(&outcome.records)?;
    }
    Ok(outcome)
}

fn run_scan_command(
    config_path: Option<&Path>,
    data_dir: Option<&Path>,
    date: Option<NaiveDate>,
    backtest: bool,
    output_dir: Option<&Path>,
    ticker_args: &[String],
) -> ExitCode {
    // Stage 1: config
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => return fail(e),
    };
    let analysis = AnalysisConfig::from_config(&adapter);
    if let Err(e) = validate_analysis_config(&analysis) {
        return fail(e);
    }

    // Stage 2: request
    let today = chrono::Local::now().date_naive();
    let request = match build_scan_request(date, today, backtest, ticker_args, &adapter) {
        Ok(r) => r,
        Err(e) => return fail(e),
    };
    let data_dir = resolve_dir(data_dir, &adapter, "data", "path", DEFAULT_DATA_DIR);
    let output_dir = resolve_dir(output_dir, &adapter, "report", "output_dir", DEFAULT_OUTPUT_DIR);
    info!(
        as_of = %request.as_of,
        backtest = request.backtest,
        tickers = request.tickers.len(),
        data = %data_dir.display(),
        "scan requested"
    );

    // Stage 3: scan and report
    let data_port = CsvAdapter::new(data_dir);
    let csv_report = CsvReportAdapter::new(output_dir);
    let console = ConsoleReport::new();
    match execute_scan(&data_port, &[&console, &csv_report], &request, &analysis) {
        Ok(outcome) => {
            info!(
                records = outcome.records.len(),
                skipped = outcome.skipped.len(),
                "consolidated report saved"
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    let adapter = match load_config(Some(config_path)) {
        Ok(a) => a,
        Err(e) => return fail(e),
    };

    let analysis = AnalysisConfig::from_config(&adapter);
    if let Err(e) = validate_analysis_config(&analysis) {
        return fail(e);
    }
    if let Err(e) = validate_scan_config(&adapter) {
        return fail(e);
    }

    let tickers = match resolve_tickers(&[], &adapter) {
        Ok(t) => t,
        Err(e) => return fail(e),
    };
    eprintln!(
        "Analysis: capital {:.2}, risk fraction {}, min history {}",
        analysis.total_capital, analysis.risk_fraction, analysis.min_history
    );
    eprintln!(
        "DMI fast/slow: {}/{}, RSI: {}, Bollinger: {}x{}",
        analysis.dmi.fast_period,
        analysis.dmi.slow_period,
        analysis.rsi_period,
        analysis.bollinger_period,
        analysis.bollinger_mult_x100 as f64 / 100.0
    );
    eprintln!("Tickers ({}):", tickers.len());
    for t in &tickers {
        eprintln!("  {:<12} {}", t.symbol, t.name);
    }
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
