//! Run metrics
//!
//! Counts orders, trades and fills from step records, and tracks notional
//! and VWAP in `Decimal`.

use crate::bots::StepRecord;
use crate::scheduler::SimObserver;
use matching_engine::OrderBookSet;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::order::Side;

/// Aggregated simulation metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimMetrics {
    pub buy_orders: u64,
    pub sell_orders: u64,
    pub total_trades: u64,
    /// Trades that exhausted at least one side
    pub total_fills: u64,
    /// Trades that left both sides with residual quantity
    pub total_partial_fills: u64,
    pub traded_quantity: u64,
    /// Sum of `quantity * execution_price`
    pub notional: Decimal,
    pub rounds: u64,
    pub resting_orders: usize,
    pub active_books: usize,
    /// Deepest single book side seen after any step, in orders
    pub max_book_depth: usize,
}

impl SimMetrics {
    pub fn new() -> Self {
        Self {
            buy_orders: 0,
            sell_orders: 0,
            total_trades: 0,
            total_fills: 0,
            total_partial_fills: 0,
            traded_quantity: 0,
            notional: Decimal::ZERO,
            rounds: 0,
            resting_orders: 0,
            active_books: 0,
            max_book_depth: 0,
        }
    }

    pub fn total_orders(&self) -> u64 {
        self.buy_orders + self.sell_orders
    }

    /// Volume-weighted average execution price, if anything traded
    pub fn vwap(&self) -> Option<Decimal> {
        if self.traded_quantity == 0 {
            return None;
        }
        Some(self.notional / Decimal::from(self.traded_quantity))
    }

    /// Record one trader step
    pub fn record_step(&mut self, record: &StepRecord) {
        match record.ticket.side {
            Side::BUY => self.buy_orders += 1,
            Side::SELL => self.sell_orders += 1,
        }

        for trade in &record.trades {
            self.total_trades += 1;
            if trade.fills_buy() || trade.fills_sell() {
                self.total_fills += 1;
            } else {
                self.total_partial_fills += 1;
            }
            let quantity = trade.quantity.as_u64();
            self.traded_quantity += quantity;
            self.notional += Decimal::from(quantity) * Decimal::from(trade.execution_price().as_u64());
        }
    }

    /// Refresh book-level gauges from the current universe
    pub fn observe_books(&mut self, universe: &OrderBookSet) {
        self.resting_orders = universe.resting_order_count();
        self.active_books = universe.active_slots().count();
    }

    pub fn update_book_depth(&mut self, depth: usize) {
        if depth > self.max_book_depth {
            self.max_book_depth = depth;
        }
    }

    pub fn summary(&self) -> String {
        let vwap = self
            .vwap()
            .map(|v| v.round_dp(2).to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "Orders: {} (buy {}, sell {}) | Trades: {} | Volume: {} | Notional: {} | VWAP: {} | Resting: {} in {} books | Rounds: {}",
            self.total_orders(),
            self.buy_orders,
            self.sell_orders,
            self.total_trades,
            self.traded_quantity,
            self.notional,
            vwap,
            self.resting_orders,
            self.active_books,
            self.rounds,
        )
    }
}

impl Default for SimMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SimObserver for SimMetrics {
    fn on_step(&mut self, record: &StepRecord, universe: &OrderBookSet) {
        self.record_step(record);
        if let Ok(book) = universe.book(record.ticket.instrument) {
            self.update_book_depth(book.bids().order_count().max(book.asks().order_count()));
        }
    }

    fn on_round_complete(&mut self, round: u64, _steps: usize, universe: &OrderBookSet) {
        self.rounds = round;
        self.observe_books(universe);
    }
}
