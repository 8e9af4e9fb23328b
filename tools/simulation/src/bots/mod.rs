//! Simulated trader bots

pub mod random_trader;

pub use random_trader::{OrderTicket, RandomTrader, StepOutcome, StepRecord, TraderConfig};
