//! Deterministic multi-trader order matching simulation
//!
//! A fixed set of random traders takes turns submitting limit orders into a
//! universe of order books. Interleaving is cooperative and round-robin, and
//! every trader draws from its own seeded LCG, so a configuration always
//! produces the same orders and the same trades.
//!
//! # Modules
//! - `rng`: Seeded linear congruential stream
//! - `bots`: Random trader state machine
//! - `scheduler`: Round-robin driver and the observer hook
//! - `config`: Run parameters from JSON, environment and arguments
//! - `ticker`: `TICKER{n}` symbols and their slots
//! - `metrics`: Order, trade and volume counters
//! - `reports`: Book dumps and depth snapshots
//! - `replay`: Trade log, digest and determinism check
//! - `export`: JSON export of a finished run

pub mod rng;
pub mod bots;
pub mod scheduler;
pub mod config;
pub mod ticker;
pub mod metrics;
pub mod reports;
pub mod replay;
pub mod export;

use bots::RandomTrader;
use config::{ConfigError, SimConfig};
use matching_engine::{create_universe, BookSnapshot, OrderBookSet};
use metrics::SimMetrics;
use replay::TradeDigest;
use rng::LcgStream;
use scheduler::{RoundRobinScheduler, SimObserver};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use types::errors::EngineError;
use types::ids::TraderId;

/// Crate version constant
pub const VERSION: &str = "1.0.0";

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Engine rejected an order: {0}")]
    Engine(#[from] EngineError),
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub config: SimConfig,
    pub metrics: SimMetrics,
    pub rounds: u64,
    /// SHA-256 over the ordered trade stream
    pub trade_digest: String,
    /// Final state of every non-empty book, in slot order
    pub books: Vec<BookSnapshot>,
}

/// One simulation run: a universe plus the traders that act on it
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    universe: OrderBookSet,
    scheduler: RoundRobinScheduler,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let traders = (0..config.num_traders)
            .map(|index| {
                RandomTrader::new(
                    TraderId::new(index),
                    LcgStream::new(config.trader_seed(index)),
                    config.transactions_per_trader,
                    config.orders,
                )
            })
            .collect();

        Ok(Self {
            universe: create_universe(config.instrument_count),
            scheduler: RoundRobinScheduler::new(traders),
            config,
        })
    }

    /// Run to completion
    pub fn run(&mut self) -> Result<SimulationReport, SimulationError> {
        self.run_with(&mut ())
    }

    /// Run to completion, reporting every step to `observer`
    ///
    /// Traders that already finished are not resumed, so running a completed
    /// simulation again reports an empty run.
    pub fn run_with<O: SimObserver + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Result<SimulationReport, SimulationError> {
        tracing::info!(
            traders = self.config.num_traders,
            transactions = self.config.transactions_per_trader,
            instruments = self.config.instrument_count,
            seed = self.config.base_seed,
            "Starting simulation"
        );

        let mut metrics = SimMetrics::new();
        let mut digest = TradeDigest::new();
        let rounds_before = self.scheduler.rounds();
        let rounds = {
            let mut observers = (&mut metrics, (&mut digest, observer));
            self.scheduler.run(&mut self.universe, &mut observers)? - rounds_before
        };
        metrics.rounds = rounds;
        metrics.observe_books(&self.universe);

        tracing::info!(
            rounds,
            orders = metrics.total_orders(),
            trades = metrics.total_trades,
            volume = metrics.traded_quantity,
            resting = metrics.resting_orders,
            "Simulation complete"
        );

        Ok(SimulationReport {
            config: self.config.clone(),
            metrics,
            rounds,
            trade_digest: digest.hex(),
            books: self
                .universe
                .books()
                .filter(|book| !book.is_empty())
                .map(|book| book.snapshot())
                .collect(),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn universe(&self) -> &OrderBookSet {
        &self.universe
    }
}

/// Run `num_traders` traders for `num_transactions` orders each over
/// `instrument_count` books, with the default seeds and order bounds
pub fn run_simulation(
    num_traders: u32,
    num_transactions: u32,
    instrument_count: usize,
) -> Result<SimulationReport, SimulationError> {
    Simulation::new(SimConfig::new(num_traders, num_transactions, instrument_count))?.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run_rests_everything() {
        let report = run_simulation(5, 10, 1024).unwrap();

        assert_eq!(report.metrics.total_orders(), 50);
        assert_eq!(report.metrics.total_trades, 0);
        assert_eq!(report.metrics.resting_orders, 50);
        assert_eq!(report.rounds, 10);
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(matches!(
            run_simulation(0, 10, 4),
            Err(SimulationError::Config(ConfigError::NoTraders))
        ));
        assert!(matches!(
            run_simulation(1, 10, 0),
            Err(SimulationError::Config(ConfigError::EmptyUniverse))
        ));
    }

    #[test]
    fn test_second_run_is_empty() {
        let mut simulation = Simulation::new(SimConfig::new(2, 3, 4)).unwrap();
        let first = simulation.run().unwrap();
        let second = simulation.run().unwrap();

        assert_eq!(first.metrics.total_orders(), 6);
        assert_eq!(second.metrics.total_orders(), 0);
        assert_eq!(second.rounds, 0);
        assert_eq!(second.books, first.books);
    }

    #[test]
    fn test_zero_transactions() {
        let report = run_simulation(3, 0, 4).unwrap();

        assert_eq!(report.rounds, 0);
        assert!(report.books.is_empty());
    }

    #[test]
    fn test_seed_changes_the_run() {
        let base = Simulation::new(SimConfig::new(2, 20, 2)).unwrap().run().unwrap();
        let mut config = SimConfig::new(2, 20, 2);
        config.base_seed = 42;
        let other = Simulation::new(config).unwrap().run().unwrap();

        assert_ne!(base.books, other.books);
    }
}
