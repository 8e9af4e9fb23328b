//! Order types
//!
//! A plain limit order: side, instrument, price and a remaining quantity that
//! only the matching loop decrements.

use crate::errors::OrderError;
use crate::ids::{InstrumentSlot, OrderId};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::BUY => write!(f, "Buy"),
            Side::SELL => write!(f, "Sell"),
        }
    }
}

/// Resting or incoming limit order
///
/// `price`, `side` and `instrument` never change after construction.
/// `quantity` is the remaining quantity and is strictly positive for as long
/// as the order sits in a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub instrument: InstrumentSlot,
    pub side: Side,
    pub price: Price,
    quantity: Quantity,
}

impl Order {
    /// Validate raw inputs and build an order
    ///
    /// Fails fast on a non-positive quantity or a negative price; such an
    /// order never gets near a book.
    pub fn new(
        order_id: OrderId,
        instrument: InstrumentSlot,
        side: Side,
        quantity: i64,
        price: i64,
    ) -> Result<Self, OrderError> {
        let quantity = Quantity::try_new(quantity)?;
        let price = Price::try_new(price)?;

        Ok(Self {
            order_id,
            instrument,
            side,
            price,
            quantity,
        })
    }

    /// Remaining quantity
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Check if nothing is left to fill
    pub fn is_filled(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Decrement the remaining quantity by a fill
    ///
    /// # Panics
    /// Panics if the fill exceeds the remaining quantity
    pub fn apply_fill(&mut self, fill_quantity: Quantity) {
        assert!(
            fill_quantity <= self.quantity,
            "Fill would exceed order quantity"
        );
        self.quantity = self.quantity - fill_quantity;
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}@{} ({})",
            self.order_id, self.side, self.quantity, self.price, self.instrument
        )
    }
}
