//! Trade execution logic
//!
//! Runs the matching pass for one book: crosses the best bid against the best
//! ask until the book is no longer crossed, handling full and partial fills.

use types::numeric::Quantity;
use types::order::Order;
use types::trade::Trade;

use super::crossing::can_match;
use crate::book::OrderBook;

/// Match executor for handling trade generation
#[derive(Debug, Clone)]
pub struct MatchExecutor {
    sequence_counter: u64,
}

impl MatchExecutor {
    /// Create a new match executor with starting sequence number
    pub fn new(starting_sequence: u64) -> Self {
        Self {
            sequence_counter: starting_sequence,
        }
    }

    /// Get next sequence number (monotonically increasing)
    fn next_sequence(&mut self) -> u64 {
        let seq = self.sequence_counter;
        self.sequence_counter += 1;
        seq
    }

    /// Sequence number the next trade will get
    pub fn peek_sequence(&self) -> u64 {
        self.sequence_counter
    }

    /// Match the book until it is no longer crossed
    ///
    /// Each iteration fills `min(bid, ask)` and removes whichever front
    /// order hits zero (both, on equal quantities). Resident quantity strictly
    /// shrinks every iteration, so the loop always ends.
    pub fn match_book(&mut self, book: &mut OrderBook) -> Vec<Trade> {
        let mut trades = Vec::new();

        loop {
            let Some((bid_price, bid_level)) = book.bids.best_bid_level_mut() else {
                break;
            };
            let Some((ask_price, ask_level)) = book.asks.best_ask_level_mut() else {
                break;
            };

            if !can_match(bid_price, ask_price) {
                break;
            }

            let (Some(buy), Some(sell)) = (bid_level.front(), ask_level.front()) else {
                break;
            };
            let (buy, sell) = (buy.clone(), sell.clone());
            let trade_qty = buy.quantity().min(sell.quantity());

            bid_level.fill_front(trade_qty);
            ask_level.fill_front(trade_qty);

            let trade = self.execute_trade(buy, sell, trade_qty);
            tracing::debug!(
                sequence = trade.sequence,
                instrument = trade.instrument.index(),
                buy_order = trade.buy.order_id.as_u64(),
                sell_order = trade.sell.order_id.as_u64(),
                bid = bid_price.as_u64(),
                ask = ask_price.as_u64(),
                quantity = trade_qty.as_u64(),
                "Matched"
            );
            trades.push(trade);

            book.bids.prune_level(bid_price);
            book.asks.prune_level(ask_price);
        }

        trades
    }

    /// Build the trade event from pre-fill snapshots of both orders
    fn execute_trade(&mut self, buy: Order, sell: Order, quantity: Quantity) -> Trade {
        let sequence = self.next_sequence();
        Trade::new(sequence, buy, sell, quantity)
    }
}

impl Default for MatchExecutor {
    fn default() -> Self {
        Self::new(0)
    }
}
