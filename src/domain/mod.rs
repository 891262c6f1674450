//! Core domain types and logic: candles, indicators, classifiers and the
//! analysis pipeline. Indicators, classifiers and the pipeline are pure;
//! `scan` reaches market data only through the `DataPort` it is handed.

pub mod ohlcv;
pub mod timeframe;
pub mod indicator;
pub mod trend;
pub mod confirmation;
pub mod advisor;
pub mod sizing;
pub mod report;
pub mod pipeline;
pub mod scan;
pub mod universe;
pub mod config;
pub mod config_validation;
pub mod error;
