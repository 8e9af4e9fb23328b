//! Trade log and determinism checks
//!
//! Two runs of the same configuration must produce the same trades in the same
//! order. The digest is a SHA-256 over every trade as it happens, so runs can
//! be compared without keeping the log.

use crate::bots::StepRecord;
use crate::config::SimConfig;
use crate::scheduler::SimObserver;
use crate::{Simulation, SimulationError};
use matching_engine::{BookSnapshot, OrderBookSet};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use types::trade::Trade;

/// Running SHA-256 over the ordered trade stream
#[derive(Clone)]
pub struct TradeDigest {
    hasher: Sha256,
    trades: u64,
}

impl TradeDigest {
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
            trades: 0,
        }
    }

    pub fn record(&mut self, trade: &Trade) {
        self.hasher.update(trade.sequence.to_le_bytes());
        self.hasher.update((trade.instrument.index() as u64).to_le_bytes());
        self.hasher.update(trade.buy.order_id.as_u64().to_le_bytes());
        self.hasher.update(trade.sell.order_id.as_u64().to_le_bytes());
        self.hasher.update(trade.quantity.as_u64().to_le_bytes());
        self.hasher.update(trade.execution_price().as_u64().to_le_bytes());
        self.trades += 1;
    }

    pub fn trade_count(&self) -> u64 {
        self.trades
    }

    /// Hex digest of everything recorded so far
    pub fn hex(&self) -> String {
        format!("{:x}", self.hasher.clone().finalize())
    }
}

impl Default for TradeDigest {
    fn default() -> Self {
        Self::new()
    }
}

impl SimObserver for TradeDigest {
    fn on_step(&mut self, record: &StepRecord, _universe: &OrderBookSet) {
        for trade in &record.trades {
            self.record(trade);
        }
    }
}

/// Full ordered trade log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeLog {
    pub trades: Vec<Trade>,
}

impl TradeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl SimObserver for TradeLog {
    fn on_step(&mut self, record: &StepRecord, _universe: &OrderBookSet) {
        self.trades.extend(record.trades.iter().cloned());
    }
}

/// Outcome of running one configuration twice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayValidation {
    pub matches: bool,
    pub original_digest: String,
    pub replayed_digest: String,
    pub trade_count: usize,
    /// First trade index at which the runs diverge
    pub first_divergence: Option<usize>,
}

fn run_logged(config: &SimConfig) -> Result<(TradeLog, Vec<BookSnapshot>), SimulationError> {
    let mut simulation = Simulation::new(config.clone())?;
    let mut log = TradeLog::new();
    simulation.run_with(&mut log)?;
    let books = simulation
        .universe()
        .books()
        .filter(|book| !book.is_empty())
        .map(|book| book.snapshot())
        .collect();
    Ok((log, books))
}

fn digest_of(log: &TradeLog) -> String {
    let mut digest = TradeDigest::new();
    log.trades.iter().for_each(|trade| digest.record(trade));
    digest.hex()
}

/// Run `config` twice from scratch and compare trades and final books
pub fn verify_determinism(config: &SimConfig) -> Result<ReplayValidation, SimulationError> {
    let (original, original_books) = run_logged(config)?;
    let (replayed, replayed_books) = run_logged(config)?;

    let first_divergence = original
        .trades
        .iter()
        .zip(&replayed.trades)
        .position(|(a, b)| a != b)
        .or_else(|| {
            (original.len() != replayed.len()).then(|| original.len().min(replayed.len()))
        });
    let matches = first_divergence.is_none() && original_books == replayed_books;

    if !matches {
        tracing::warn!(?first_divergence, "Replay diverged");
    }

    Ok(ReplayValidation {
        matches,
        original_digest: digest_of(&original),
        replayed_digest: digest_of(&replayed),
        trade_count: original.len(),
        first_divergence,
    })
}
