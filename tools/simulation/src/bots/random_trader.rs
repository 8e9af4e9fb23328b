//! Random limit-order trader
//!
//! A trader is a resumable task written as an explicit state machine: it owns
//! its random stream and a step counter, and each call to [`RandomTrader::step`]
//! derives one order, submits it and hands control back to the scheduler.

use crate::rng::LcgStream;
use matching_engine::OrderBookSet;
use serde::{Deserialize, Serialize};
use types::errors::EngineError;
use types::ids::{InstrumentSlot, TraderId};
use types::order::Side;
use types::trade::Trade;

/// Bounds for generated orders (both ends inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraderConfig {
    pub min_quantity: u64,
    pub max_quantity: u64,
    pub min_price: u64,
    pub max_price: u64,
}

impl Default for TraderConfig {
    fn default() -> Self {
        Self {
            min_quantity: 1,
            max_quantity: 100,
            min_price: 10,
            max_price: 1000,
        }
    }
}

/// Order parameters derived from four draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTicket {
    pub side: Side,
    pub instrument: InstrumentSlot,
    pub quantity: u64,
    pub price: u64,
}

/// What one resumed step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub trader: TraderId,
    /// 1-based index of this step within the trader's run
    pub step: u32,
    pub ticket: OrderTicket,
    /// Trades produced by the matching pass the order triggered
    pub trades: Vec<Trade>,
}

/// Result of resuming a trader
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Submitted one order; resume again later
    Continue(StepRecord),
    /// All transactions done; never resume again
    Done,
}

/// Random trader with a private deterministic stream
#[derive(Debug, Clone)]
pub struct RandomTrader {
    pub id: TraderId,
    pub config: TraderConfig,
    num_transactions: u32,
    completed: u32,
    stream: LcgStream,
}

impl RandomTrader {
    /// Create a trader that will submit exactly `num_transactions` orders.
    pub fn new(id: TraderId, stream: LcgStream, num_transactions: u32, config: TraderConfig) -> Self {
        Self {
            id,
            config,
            num_transactions,
            completed: 0,
            stream,
        }
    }

    /// Derive the next order from the stream
    ///
    /// Draws side, instrument slot, quantity and price, in that order. Changing
    /// the order or the number of draws changes every order that follows.
    pub fn next_ticket(&mut self, instrument_count: usize) -> OrderTicket {
        let side = if self.stream.draw_lower_half() {
            Side::BUY
        } else {
            Side::SELL
        };
        let instrument = InstrumentSlot::new(self.stream.draw_index(instrument_count));
        let quantity = self
            .stream
            .draw_inclusive(self.config.min_quantity, self.config.max_quantity);
        let price = self
            .stream
            .draw_inclusive(self.config.min_price, self.config.max_price);

        OrderTicket {
            side,
            instrument,
            quantity,
            price,
        }
    }

    /// Resume the trader for one step
    pub fn step(&mut self, universe: &mut OrderBookSet) -> Result<StepOutcome, EngineError> {
        if self.is_done() {
            return Ok(StepOutcome::Done);
        }
        if universe.is_empty() {
            return Err(EngineError::UnknownInstrument {
                slot: 0,
                universe_size: 0,
            });
        }

        let ticket = self.next_ticket(universe.len());
        tracing::debug!(
            trader = self.id.index(),
            side = %ticket.side,
            instrument = ticket.instrument.index(),
            quantity = ticket.quantity,
            price = ticket.price,
            "Trader order"
        );

        let trades = universe.submit(
            ticket.instrument,
            ticket.side,
            ticket.quantity as i64,
            ticket.price as i64,
        )?;
        self.completed += 1;

        Ok(StepOutcome::Continue(StepRecord {
            trader: self.id,
            step: self.completed,
            ticket,
            trades,
        }))
    }

    pub fn is_done(&self) -> bool {
        self.completed >= self.num_transactions
    }

    /// Steps completed so far
    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn num_transactions(&self) -> u32 {
        self.num_transactions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::BASE_SEED;
    use matching_engine::create_universe;
    use types::errors::OrderError;

    fn trader(index: u32, transactions: u32) -> RandomTrader {
        RandomTrader::new(
            TraderId::new(index),
            LcgStream::for_trader(BASE_SEED, index),
            transactions,
            TraderConfig::default(),
        )
    }

    fn ticket(side: Side, slot: usize, quantity: u64, price: u64) -> OrderTicket {
        OrderTicket {
            side,
            instrument: InstrumentSlot::new(slot),
            quantity,
            price,
        }
    }

    #[test]
    fn test_reference_tickets_trader_zero() {
        let mut t = trader(0, 3);

        assert_eq!(t.next_ticket(1024), ticket(Side::BUY, 539, 81, 94));
        assert_eq!(t.next_ticket(1024), ticket(Side::SELL, 247, 29, 389));
        assert_eq!(t.next_ticket(1024), ticket(Side::SELL, 403, 53, 680));
    }

    #[test]
    fn test_reference_tickets_trader_one() {
        let mut t = trader(1, 2);

        assert_eq!(t.next_ticket(1024), ticket(Side::SELL, 132, 90, 224));
        assert_eq!(t.next_ticket(1024), ticket(Side::SELL, 240, 22, 489));
    }

    #[test]
    fn test_tickets_stay_in_bounds() {
        let mut t = trader(4, 500);
        for _ in 0..500 {
            let tk = t.next_ticket(7);
            assert!(tk.instrument.index() < 7);
            assert!((1..=100).contains(&tk.quantity));
            assert!((10..=1000).contains(&tk.price));
        }
    }

    #[test]
    fn test_step_submits_then_finishes() {
        let mut universe = create_universe(1024);
        let mut t = trader(0, 2);

        match t.step(&mut universe).unwrap() {
            StepOutcome::Continue(record) => {
                assert_eq!(record.step, 1);
                assert_eq!(record.ticket, ticket(Side::BUY, 539, 81, 94));
                assert!(record.trades.is_empty());
            }
            StepOutcome::Done => panic!("Expected a step"),
        }
        assert!(matches!(t.step(&mut universe).unwrap(), StepOutcome::Continue(_)));
        assert!(t.is_done());

        // Done is sticky and consumes no draws or orders
        assert_eq!(t.step(&mut universe).unwrap(), StepOutcome::Done);
        assert_eq!(t.step(&mut universe).unwrap(), StepOutcome::Done);
        assert_eq!(universe.orders_accepted(), 2);
        assert_eq!(t.completed(), 2);
    }

    #[test]
    fn test_zero_transactions_is_done_immediately() {
        let mut universe = create_universe(4);
        let mut t = trader(0, 0);

        assert_eq!(t.step(&mut universe).unwrap(), StepOutcome::Done);
        assert_eq!(universe.orders_accepted(), 0);
    }

    #[test]
    fn test_empty_universe_is_an_error() {
        let mut universe = create_universe(0);
        let mut t = trader(0, 1);

        assert!(t.step(&mut universe).is_err());
        assert_eq!(t.completed(), 0);
    }

    #[test]
    fn test_full_width_bounds_are_rejected_not_panicking() {
        let mut universe = create_universe(4);
        let config = TraderConfig {
            min_quantity: u64::MAX,
            max_quantity: u64::MAX,
            min_price: 0,
            max_price: u64::MAX,
        };
        let mut t = RandomTrader::new(TraderId::new(0), LcgStream::new(BASE_SEED), 1, config);

        let err = t.step(&mut universe).unwrap_err();
        assert_eq!(err, EngineError::Order(OrderError::InvalidQuantity(-1)));
        assert_eq!(universe.orders_accepted(), 0);
        assert!(!t.is_done());
    }
}
