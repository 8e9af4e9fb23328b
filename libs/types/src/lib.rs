//! Types library for the order matching simulator
//!
//! Core type definitions shared by the matching engine and the simulation
//! driver.
//!
//! # Modules
//! - `ids`: Identifiers (OrderId, InstrumentSlot, TraderId)
//! - `numeric`: Integer price and quantity types
//! - `order`: Limit order and side
//! - `trade`: Trade events
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod order;
pub mod trade;
pub mod errors;
