//! Depth snapshots
//!
//! Aggregated price levels per book, for export.

use crate::ticker::format_ticker;
use matching_engine::{OrderBook, OrderBookSet};
use serde::{Deserialize, Serialize};
use types::numeric::{Price, Quantity};

/// One aggregated price level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthLevel {
    pub price: u64,
    pub quantity: u64,
    pub cumulative_quantity: u64,
}

/// Top levels of one book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthSnapshot {
    pub symbol: String,
    pub slot: usize,
    pub bids: Vec<DepthLevel>,
    pub asks: Vec<DepthLevel>,
    pub total_bid_quantity: u64,
    pub total_ask_quantity: u64,
    /// Best ask minus best bid, when both sides are present
    pub spread: Option<u64>,
}

fn cumulative(levels: Vec<(Price, Quantity)>) -> Vec<DepthLevel> {
    let mut running = 0;
    levels
        .into_iter()
        .map(|(price, quantity)| {
            running += quantity.as_u64();
            DepthLevel {
                price: price.as_u64(),
                quantity: quantity.as_u64(),
                cumulative_quantity: running,
            }
        })
        .collect()
}

/// Snapshot the top `depth` levels of each side
pub fn snapshot(book: &OrderBook, depth: usize) -> DepthSnapshot {
    let spread = match (book.bids().best_bid_price(), book.asks().best_ask_price()) {
        (Some(bid), Some(ask)) => Some(ask.as_u64() - bid.as_u64()),
        _ => None,
    };

    DepthSnapshot {
        symbol: format_ticker(book.instrument()),
        slot: book.instrument().index(),
        bids: cumulative(book.bids().depth_snapshot(depth)),
        asks: cumulative(book.asks().depth_snapshot(depth)),
        total_bid_quantity: book.bids().total_quantity().as_u64(),
        total_ask_quantity: book.asks().total_quantity().as_u64(),
        spread,
    }
}

/// Snapshots of every non-empty book, in slot order
pub fn snapshot_active(universe: &OrderBookSet, depth: usize) -> Vec<DepthSnapshot> {
    universe
        .books()
        .filter(|book| !book.is_empty())
        .map(|book| snapshot(book, depth))
        .collect()
}
