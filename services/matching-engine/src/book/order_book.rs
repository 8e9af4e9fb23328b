//! Order book for a single instrument slot

use serde::{Deserialize, Serialize};
use types::ids::InstrumentSlot;
use types::order::{Order, Side};

use super::{AskBook, BidBook};

/// Bids and asks of one instrument slot
#[derive(Debug, Clone)]
pub struct OrderBook {
    instrument: InstrumentSlot,
    pub(crate) bids: BidBook,
    pub(crate) asks: AskBook,
}

impl OrderBook {
    pub fn new(instrument: InstrumentSlot) -> Self {
        Self {
            instrument,
            bids: BidBook::new(),
            asks: AskBook::new(),
        }
    }

    pub fn instrument(&self) -> InstrumentSlot {
        self.instrument
    }

    /// Rest an order on its side of the book
    ///
    /// Does not match. Going through `OrderBookSet::submit` is what keeps the
    /// book uncrossed.
    pub fn insert(&mut self, order: Order) {
        debug_assert_eq!(order.instrument, self.instrument, "order routed to wrong book");
        tracing::trace!(
            instrument = self.instrument.index(),
            order_id = order.order_id.as_u64(),
            side = %order.side,
            price = order.price.as_u64(),
            quantity = order.quantity().as_u64(),
            "Resting order"
        );

        match order.side {
            Side::BUY => self.bids.insert(order),
            Side::SELL => self.asks.insert(order),
        }
    }

    pub fn best_bid(&self) -> Option<&Order> {
        self.bids.best_bid()
    }

    pub fn best_ask(&self) -> Option<&Order> {
        self.asks.best_ask()
    }

    /// Remove and return the front order of one side
    ///
    /// # Panics
    /// Panics if that side is empty.
    pub fn pop_front(&mut self, side: Side) -> Order {
        match side {
            Side::BUY => self.bids.pop_front(),
            Side::SELL => self.asks.pop_front(),
        }
    }

    pub fn bids(&self) -> &BidBook {
        &self.bids
    }

    pub fn asks(&self) -> &AskBook {
        &self.asks
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Check if the best bid reaches the best ask
    pub fn is_crossed(&self) -> bool {
        match (self.bids.best_bid_price(), self.asks.best_ask_price()) {
            (Some(bid), Some(ask)) => crate::matching::can_match(bid, ask),
            _ => false,
        }
    }

    /// Copy both sides out in priority order
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            instrument: self.instrument,
            bids: self.bids.orders().cloned().collect(),
            asks: self.asks.orders().cloned().collect(),
        }
    }
}

/// Read-only view of one book for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub instrument: InstrumentSlot,
    /// Best bid first
    pub bids: Vec<Order>,
    /// Best ask first
    pub asks: Vec<Order>,
}

impl BookSnapshot {
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
