//! Matching engine core
//!
//! `OrderBookSet` owns one book per instrument slot plus the trade sequence.
//! It is the only mutating entry point: every submission rests the order and
//! immediately runs the matching pass for that slot, so no caller ever sees a
//! crossed book.

use types::errors::EngineError;
use types::ids::{InstrumentSlot, OrderId};
use types::order::{Order, Side};
use types::trade::Trade;

use crate::book::{BookSnapshot, OrderBook};
use crate::matching::MatchExecutor;

/// Allocate a universe of `instrument_count` empty books
pub fn create_universe(instrument_count: usize) -> OrderBookSet {
    OrderBookSet::new(instrument_count)
}

/// Fixed universe of order books, indexed by instrument slot
#[derive(Debug, Clone)]
pub struct OrderBookSet {
    /// One book per slot, created up front
    books: Vec<OrderBook>,
    /// Trade executor with sequence generation
    executor: MatchExecutor,
    next_order_id: OrderId,
}

impl OrderBookSet {
    /// Create a universe with `instrument_count` empty books
    pub fn new(instrument_count: usize) -> Self {
        let books = (0..instrument_count)
            .map(|index| OrderBook::new(InstrumentSlot::new(index)))
            .collect();

        Self {
            books,
            executor: MatchExecutor::new(0),
            next_order_id: OrderId::new(1),
        }
    }

    /// Submit a limit order and match the slot it lands in
    ///
    /// Returns every trade produced by the matching pass, in execution order
    /// (possibly none). Rejects unknown slots and invalid quantity/price
    /// before touching any book.
    pub fn submit(
        &mut self,
        slot: InstrumentSlot,
        side: Side,
        quantity: i64,
        price: i64,
    ) -> Result<Vec<Trade>, EngineError> {
        let universe_size = self.books.len();
        let book = self
            .books
            .get_mut(slot.index())
            .ok_or(EngineError::UnknownInstrument {
                slot: slot.index(),
                universe_size,
            })?;

        let order = Order::new(self.next_order_id, slot, side, quantity, price)?;
        self.next_order_id = self.next_order_id.next();

        tracing::debug!(
            order_id = order.order_id.as_u64(),
            instrument = slot.index(),
            side = %side,
            quantity,
            price,
            "Order accepted"
        );

        book.insert(order);
        let trades = self.executor.match_book(book);
        debug_assert!(!book.is_crossed(), "book left crossed after matching");

        Ok(trades)
    }

    /// Read-only copy of one book
    pub fn snapshot(&self, slot: InstrumentSlot) -> Result<BookSnapshot, EngineError> {
        self.book(slot).map(OrderBook::snapshot)
    }

    /// Borrow one book
    pub fn book(&self, slot: InstrumentSlot) -> Result<&OrderBook, EngineError> {
        self.books
            .get(slot.index())
            .ok_or(EngineError::UnknownInstrument {
                slot: slot.index(),
                universe_size: self.books.len(),
            })
    }

    /// Slots that currently hold at least one order, in slot order
    pub fn active_slots(&self) -> impl Iterator<Item = InstrumentSlot> + '_ {
        self.books
            .iter()
            .filter(|book| !book.is_empty())
            .map(OrderBook::instrument)
    }

    /// Iterate every book in slot order
    pub fn books(&self) -> impl Iterator<Item = &OrderBook> {
        self.books.iter()
    }

    /// Number of instrument slots
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Orders resting across all books
    pub fn resting_order_count(&self) -> usize {
        self.books
            .iter()
            .map(|book| book.bids().order_count() + book.asks().order_count())
            .sum()
    }

    /// Number of orders accepted so far
    pub fn orders_accepted(&self) -> u64 {
        self.next_order_id.as_u64() - 1
    }

    /// Number of trades executed so far
    pub fn trades_executed(&self) -> u64 {
        self.executor.peek_sequence()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::errors::OrderError;
    use types::numeric::{Price, Quantity};

    const SLOT: InstrumentSlot = InstrumentSlot::new(7);

    fn levels(orders: &[Order]) -> Vec<(u64, u64)> {
        orders
            .iter()
            .map(|o| (o.quantity().as_u64(), o.price.as_u64()))
            .collect()
    }

    #[test]
    fn test_create_universe() {
        let universe = create_universe(1024);

        assert_eq!(universe.len(), 1024);
        assert_eq!(universe.active_slots().count(), 0);
        assert_eq!(universe.resting_order_count(), 0);
    }

    #[test]
    fn test_engine_resting_order() {
        let mut universe = create_universe(16);
        let trades = universe.submit(SLOT, Side::BUY, 10, 100).unwrap();

        assert!(trades.is_empty());
        assert_eq!(universe.active_slots().collect::<Vec<_>>(), vec![SLOT]);
    }

    #[test]
    fn test_engine_partial_then_full_sequence() {
        let mut universe = create_universe(16);

        // Bid 10@100 rests
        assert!(universe.submit(SLOT, Side::BUY, 10, 100).unwrap().is_empty());

        // Sell 4@90 crosses: bid keeps 6@100, no asks
        let trades = universe.submit(SLOT, Side::SELL, 4, 90).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity, Quantity::from_u64(4));
        assert_eq!(trades[0].execution_price(), Price::from_u64(100));
        let snap = universe.snapshot(SLOT).unwrap();
        assert_eq!(levels(&snap.bids), vec![(6, 100)]);
        assert!(snap.asks.is_empty());

        // Sell 10@100 exhausts the bid and rests 4@100
        let trades = universe.submit(SLOT, Side::SELL, 10, 100).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity, Quantity::from_u64(6));
        let snap = universe.snapshot(SLOT).unwrap();
        assert!(snap.bids.is_empty());
        assert_eq!(levels(&snap.asks), vec![(4, 100)]);

        assert_eq!(universe.orders_accepted(), 3);
        assert_eq!(universe.trades_executed(), 2);
    }

    #[test]
    fn test_engine_no_cross() {
        let mut universe = create_universe(16);

        universe.submit(SLOT, Side::SELL, 1, 510).unwrap();
        let trades = universe.submit(SLOT, Side::BUY, 1, 500).unwrap();

        assert!(trades.is_empty());
        assert_eq!(universe.resting_order_count(), 2);
    }

    #[test]
    fn test_books_are_independent() {
        let mut universe = create_universe(16);

        universe.submit(InstrumentSlot::new(1), Side::SELL, 5, 100).unwrap();
        let trades = universe.submit(InstrumentSlot::new(2), Side::BUY, 5, 200).unwrap();

        assert!(trades.is_empty());
        assert_eq!(universe.active_slots().count(), 2);
    }

    #[test]
    fn test_rejects_invalid_order() {
        let mut universe = create_universe(16);

        let err = universe.submit(SLOT, Side::BUY, 0, 100).unwrap_err();
        assert_eq!(err, EngineError::Order(OrderError::InvalidQuantity(0)));

        let err = universe.submit(SLOT, Side::SELL, 3, -1).unwrap_err();
        assert_eq!(err, EngineError::Order(OrderError::InvalidPrice(-1)));

        // Rejected orders never reach the book or consume an id
        assert_eq!(universe.resting_order_count(), 0);
        assert_eq!(universe.orders_accepted(), 0);
    }

    #[test]
    fn test_rejects_unknown_slot() {
        let mut universe = create_universe(4);

        let err = universe.submit(InstrumentSlot::new(4), Side::BUY, 1, 1).unwrap_err();
        assert_eq!(
            err,
            EngineError::UnknownInstrument { slot: 4, universe_size: 4 }
        );
        assert!(universe.snapshot(InstrumentSlot::new(9)).is_err());
    }
}
