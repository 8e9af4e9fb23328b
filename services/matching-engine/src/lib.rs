//! Matching Engine
//!
//! In-memory limit order books, one per instrument slot, matched with
//! price-time priority and partial fills.
//!
//! **Key Invariants:**
//! - Bids descending and asks ascending by price, FIFO within a price
//! - No book is ever left crossed once `submit` returns
//! - Deterministic matching (same inputs → same outputs)
//! - Conservation of quantity: each trade removes the same amount from both sides

pub mod book;
pub mod matching;
pub mod engine;

pub use book::{BookSnapshot, OrderBook};
pub use engine::{create_universe, OrderBookSet};
