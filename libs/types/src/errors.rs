//! Error types for the matching engine
//!
//! Error taxonomy using thiserror. Only rejected input is an error here;
//! reading an empty book side is a caller bug and panics instead.

use thiserror::Error;

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Unknown instrument slot {slot} (universe has {universe_size} slots)")]
    UnknownInstrument { slot: usize, universe_size: usize },
}

/// Order-specific errors, raised before an order can reach a book
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Invalid price: {0}")]
    InvalidPrice(i64),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
}
