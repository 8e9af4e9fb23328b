//! Identifier types for simulator entities
//!
//! Identifiers are plain integers handed out in submission order so that two
//! runs with the same inputs produce bit-identical order and trade streams.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an order
///
/// Assigned by the book set in strictly increasing order. A lower id means the
/// order was submitted earlier, which is what maker/taker attribution relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Create from a raw sequence value
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw sequence value
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The id that follows this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle of one order-book slot in the instrument universe
///
/// Opaque on purpose: turning a human-readable ticker into a slot is the
/// caller's job. Distinct tickers may resolve to the same slot and then share
/// a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentSlot(usize);

impl InstrumentSlot {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for InstrumentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}

/// Index of a simulated trader
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraderId(u32);

impl TraderId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TraderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trader-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_ordering() {
        let first = OrderId::new(1);
        let second = first.next();

        assert!(first < second);
        assert_eq!(second.as_u64(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderId::new(42).to_string(), "#42");
        assert_eq!(InstrumentSlot::new(7).to_string(), "slot 7");
        assert_eq!(TraderId::new(3).to_string(), "trader-3");
    }

    #[test]
    fn test_transparent_serialization() {
        let slot = InstrumentSlot::new(1023);
        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, "1023");

        let back: InstrumentSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slot);
    }
}
