//! Ticker universe: the instruments a scan covers.
//!
//! Parses `SYM:Name, SYM2:Name2` lists from configuration or the command
//! line. Symbols are upper-cased; a symbol without a name is its own name.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker {
    pub symbol: String,
    pub name: String,
}

impl Ticker {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

pub fn parse_tickers(input: &str) -> Result<Vec<Ticker>, UniverseError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }

        let (symbol, name) = match trimmed.split_once(':') {
            Some((symbol, name)) => (symbol.trim(), name.trim()),
            None => (trimmed, ""),
        };
        if symbol.is_empty() {
            return Err(UniverseError::EmptyToken);
        }

        let symbol = symbol.to_uppercase();
        if !seen.insert(symbol.clone()) {
            return Err(UniverseError::DuplicateTicker(symbol));
        }
        let name = if name.is_empty() {
            symbol.clone()
        } else {
            name.to_string()
        };
        tickers.push(Ticker { symbol, name });
    }

    Ok(tickers)
}

/// Default Stockholm universe.
pub fn default_tickers() -> Vec<Ticker> {
    [
        ("ABB.ST", "ABB"),
        ("AZN.ST", "AstraZeneca PLC"),
        ("INVE-B.ST", "Investor AB"),
        ("LUG.ST", "Lundin Gold"),
        ("LUMI.ST", "Lundin Mining"),
        ("NDA-SE.ST", "Nordea"),
        ("SAAB-B.ST", "Saab AB"),
        ("SEB-A.ST", "SEB"),
        ("SHB-B.ST", "Svenska Handelsbanken"),
        ("SWED-A.ST", "Swedbank-A"),
        ("VOLV-B.ST", "Volvo-B"),
    ]
    .into_iter()
    .map(|(symbol, name)| Ticker::new(symbol, name))
    .collect()
}
