//! Bid (buy-side) order book
//!
//! Maintains buy orders sorted by price descending (best bid first).
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::price_level::PriceLevel;

/// Bid (buy) side order book
///
/// Orders are sorted by price descending, so the highest bid is first.
/// At each price level, orders are maintained in FIFO order.
#[derive(Debug, Clone)]
pub struct BidBook {
    /// Price levels keyed ascending; best bid is the last key
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Insert an order into the bid book
    pub fn insert(&mut self, order: Order) {
        self.levels.entry(order.price).or_default().insert(order);
    }

    /// Get the best bid (highest price, earliest at that price)
    pub fn best_bid(&self) -> Option<&Order> {
        // BTreeMap iter is ascending, so we need last()
        self.levels.values().next_back().and_then(PriceLevel::front)
    }

    /// Get the best bid price
    pub fn best_bid_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Get mutable reference to the best bid level
    pub(crate) fn best_bid_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        self.levels.iter_mut().next_back().map(|(price, level)| (*price, level))
    }

    /// Drop the level at `price` if it has run empty
    pub(crate) fn prune_level(&mut self, price: Price) {
        if self.levels.get(&price).is_some_and(PriceLevel::is_empty) {
            self.levels.remove(&price);
        }
    }

    /// Remove and return the best bid
    ///
    /// # Panics
    /// Panics if the bid book is empty; callers check `is_empty` first.
    pub fn pop_front(&mut self) -> Order {
        let (price, level) = self
            .best_bid_level_mut()
            .unwrap_or_else(|| panic!("pop_front on empty bid book"));
        let order = level
            .pop_front()
            .unwrap_or_else(|| panic!("empty price level resting at {price}"));
        self.prune_level(price);
        order
    }

    /// Iterate all bids in priority order
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.levels.values().rev().flat_map(PriceLevel::iter)
    }

    /// Get depth snapshot (top N price levels)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels
            .iter()
            .rev() // Reverse to get highest prices first
            .take(depth)
            .map(|(price, level)| (*price, level.total_quantity()))
            .collect()
    }

    /// Check if the bid book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Get the total number of resting orders
    pub fn order_count(&self) -> usize {
        self.levels.values().map(PriceLevel::order_count).sum()
    }

    /// Total resting quantity across all levels
    pub fn total_quantity(&self) -> Quantity {
        self.levels.values().map(PriceLevel::total_quantity).sum()
    }
}

impl Default for BidBook {
    fn default() -> Self {
        Self::new()
    }
}
