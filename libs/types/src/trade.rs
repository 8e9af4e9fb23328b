//! Trade execution types
//!
//! A trade is an event, not a record: the engine hands it back to the caller
//! and keeps nothing.

use crate::ids::InstrumentSlot;
use crate::numeric::{Price, Quantity};
use crate::order::Order;
use serde::{Deserialize, Serialize};

/// One matching step between the best bid and the best ask
///
/// `buy` and `sell` are snapshots taken before the fill was applied, so their
/// quantities are what was resting when the two orders met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub sequence: u64, // Per-universe monotonic sequence
    pub instrument: InstrumentSlot,
    pub buy: Order,
    pub sell: Order,
    pub quantity: Quantity,
}

impl Trade {
    pub fn new(sequence: u64, buy: Order, sell: Order, quantity: Quantity) -> Self {
        Self {
            sequence,
            instrument: buy.instrument,
            buy,
            sell,
            quantity,
        }
    }

    /// Price the trade executed at
    ///
    /// The earlier of the two orders was resting in the book (maker), so the
    /// trade prints at its price.
    pub fn execution_price(&self) -> Price {
        if self.buy.order_id < self.sell.order_id {
            self.buy.price
        } else {
            self.sell.price
        }
    }

    /// Check if the trade fully consumed the buy order
    pub fn fills_buy(&self) -> bool {
        self.buy.quantity() == self.quantity
    }

    /// Check if the trade fully consumed the sell order
    pub fn fills_sell(&self) -> bool {
        self.sell.quantity() == self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::OrderId;
    use crate::order::Side;

    fn order(id: u64, side: Side, qty: i64, price: i64) -> Order {
        Order::new(OrderId::new(id), InstrumentSlot::new(7), side, qty, price).unwrap()
    }

    #[test]
    fn test_execution_price_uses_resting_order() {
        // Bid rested first, the sell crossed it
        let trade = Trade::new(
            1,
            order(1, Side::BUY, 10, 100),
            order(2, Side::SELL, 4, 90),
            Quantity::from_u64(4),
        );
        assert_eq!(trade.execution_price(), Price::from_u64(100));

        // Ask rested first, the buy crossed it
        let trade = Trade::new(
            2,
            order(4, Side::BUY, 10, 100),
            order(3, Side::SELL, 4, 90),
            Quantity::from_u64(4),
        );
        assert_eq!(trade.execution_price(), Price::from_u64(90));
    }

    #[test]
    fn test_fill_flags() {
        let trade = Trade::new(
            1,
            order(1, Side::BUY, 10, 100),
            order(2, Side::SELL, 4, 90),
            Quantity::from_u64(4),
        );

        assert!(!trade.fills_buy());
        assert!(trade.fills_sell());
        assert_eq!(trade.instrument, InstrumentSlot::new(7));
    }
}
