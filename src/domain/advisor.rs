//! Composite multi-timeframe advisor.
//!
//! A fixed-priority decision table over daily/weekly/monthly RSI, the volume
//! ratio and the 50-SMA flag. The first matching rule wins, so every input
//! maps to exactly one [`CompositeState`].

use std::fmt;

pub const BULL_ZONE: f64 = 50.0;
pub const CONFIRMATION_BUFFER: f64 = 5.0;
pub const VOLUME_CONFIRMATION: f64 = 1.2;
pub const OVERBOUGHT: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvisorInput {
    pub daily_rsi: f64,
    pub weekly_rsi: f64,
    pub monthly_rsi: f64,
    pub vol_ratio: f64,
    pub price_above_sma50: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeState {
    ConfirmedBreakout,
    WeakBreakout,
    HealthyPullback,
    MacroTrap,
    BearMarketRally,
    Overextended,
    Neutral,
}

impl CompositeState {
    pub const ALL: [CompositeState; 7] = [
        CompositeState::ConfirmedBreakout,
        CompositeState::WeakBreakout,
        CompositeState::HealthyPullback,
        CompositeState::MacroTrap,
        CompositeState::BearMarketRally,
        CompositeState::Overextended,
        CompositeState::Neutral,
    ];

    pub fn action(&self) -> &'static str {
        match self {
            CompositeState::ConfirmedBreakout => "STRONG BUY / HOLD",
            CompositeState::WeakBreakout => "WAIT FOR VOLUME",
            CompositeState::HealthyPullback => "ACCUMULATE (BUY DIP)",
            CompositeState::MacroTrap => "AVOID / DO NOT BUY",
            CompositeState::BearMarketRally => "STAY IN CASH",
            CompositeState::Overextended => "TAKE PROFITS",
            CompositeState::Neutral => "WAIT FOR SETUP",
        }
    }

    pub fn confidence(&self) -> &'static str {
        match self {
            CompositeState::ConfirmedBreakout => "HIGH",
            CompositeState::WeakBreakout => "LOW",
            CompositeState::HealthyPullback => "MEDIUM-HIGH",
            _ => "N/A",
        }
    }
}

impl fmt::Display for CompositeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            CompositeState::ConfirmedBreakout => "CONFIRMED BREAKOUT",
            CompositeState::WeakBreakout => "WEAK BREAKOUT",
            CompositeState::HealthyPullback => "HEALTHY PULLBACK",
            CompositeState::MacroTrap => "MACRO TRAP",
            CompositeState::BearMarketRally => "BEAR MARKET RALLY",
            CompositeState::Overextended => "OVEREXTENDED",
            CompositeState::Neutral => "NEUTRAL",
        };
        f.write_str(status)
    }
}

pub fn advise(input: &AdvisorInput) -> CompositeState {
    let macro_bullish = input.monthly_rsi > BULL_ZONE;

    if input.daily_rsi > BULL_ZONE + CONFIRMATION_BUFFER
        && input.weekly_rsi > BULL_ZONE
        && macro_bullish
        && input.price_above_sma50
    {
        return if input.vol_ratio >= VOLUME_CONFIRMATION {
            CompositeState::ConfirmedBreakout
        } else {
            CompositeState::WeakBreakout
        };
    }

    if macro_bullish
        && input.weekly_rsi > BULL_ZONE
        && input.daily_rsi < BULL_ZONE
        && input.price_above_sma50
    {
        return CompositeState::HealthyPullback;
    }

    if input.daily_rsi > BULL_ZONE && !macro_bullish {
        return CompositeState::MacroTrap;
    }

    if input.daily_rsi > BULL_ZONE && !input.price_above_sma50 {
        return CompositeState::BearMarketRally;
    }

    if input.daily_rsi > OVERBOUGHT && input.weekly_rsi > OVERBOUGHT {
        return CompositeState::Overextended;
    }

    CompositeState::Neutral
}
