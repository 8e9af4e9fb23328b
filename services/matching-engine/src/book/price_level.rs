//! Price level implementation with FIFO queue
//!
//! A price level contains all resting orders at one price point, kept in
//! arrival order so the earliest order at a price is always matched first.

use std::collections::VecDeque;
use types::numeric::Quantity;
use types::order::Order;

/// A price level containing orders at a specific price
///
/// Maintains strict FIFO ordering for time-priority matching.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Queue of orders at this price level (FIFO order)
    orders: VecDeque<Order>,
    /// Total quantity available at this level
    total_quantity: Quantity,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            orders: VecDeque::new(),
            total_quantity: Quantity::zero(),
        }
    }

    /// Insert an order at the back of the queue (time priority)
    pub fn insert(&mut self, order: Order) {
        self.total_quantity = self.total_quantity + order.quantity();
        self.orders.push_back(order);
    }

    /// Peek at the front order without removing it
    pub fn front(&self) -> Option<&Order> {
        self.orders.front()
    }

    /// Pop the front order from the queue
    pub fn pop_front(&mut self) -> Option<Order> {
        let order = self.orders.pop_front()?;
        self.total_quantity = self.total_quantity - order.quantity();
        Some(order)
    }

    /// Fill the front order by `fill`
    ///
    /// Returns the order if the fill exhausted it; it has already been
    /// removed from the queue in that case.
    ///
    /// # Panics
    /// Panics if the level is empty or the fill exceeds the front quantity
    pub fn fill_front(&mut self, fill: Quantity) -> Option<Order> {
        let front = self
            .orders
            .front_mut()
            .unwrap_or_else(|| panic!("fill_front on empty price level"));
        front.apply_fill(fill);
        self.total_quantity = self.total_quantity - fill;

        if front.is_filled() {
            self.orders.pop_front()
        } else {
            None
        }
    }

    /// Iterate orders in time priority
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Get the total quantity at this price level
    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::new()
    }
}
