//! Ticker symbols
//!
//! Instruments are named `TICKER{n}`. A symbol maps to slot `n % count`, so
//! distinct names can share one book when `n` aliases under the slot count.

use thiserror::Error;
use types::ids::InstrumentSlot;

pub const TICKER_PREFIX: &str = "TICKER";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TickerError {
    #[error("Symbol {0:?} does not start with TICKER")]
    MissingPrefix(String),

    #[error("Symbol {0:?} has no numeric suffix")]
    InvalidNumber(String),

    #[error("Cannot map a symbol into an empty universe")]
    EmptyUniverse,
}

/// Symbol of a slot
pub fn format_ticker(slot: InstrumentSlot) -> String {
    format!("{TICKER_PREFIX}{}", slot.index())
}

/// Resolve a symbol into one of `instrument_count` slots
pub fn parse_ticker(symbol: &str, instrument_count: usize) -> Result<InstrumentSlot, TickerError> {
    if instrument_count == 0 {
        return Err(TickerError::EmptyUniverse);
    }
    let digits = symbol
        .strip_prefix(TICKER_PREFIX)
        .ok_or_else(|| TickerError::MissingPrefix(symbol.to_string()))?;
    let number: u64 = digits
        .parse()
        .map_err(|_| TickerError::InvalidNumber(symbol.to_string()))?;

    Ok(InstrumentSlot::new((number % instrument_count as u64) as usize))
}

/// Symbols of every slot, in slot order
pub fn ticker_universe(instrument_count: usize) -> Vec<String> {
    (0..instrument_count)
        .map(|index| format_ticker(InstrumentSlot::new(index)))
        .collect()
}
