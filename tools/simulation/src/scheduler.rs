//! Cooperative round-robin scheduler
//!
//! Each round resumes every live trader exactly once, in index order. A round
//! in which no trader stepped ends the run. Everything happens on the calling
//! thread; the universe is borrowed mutably for the duration of one step only.

use crate::bots::{RandomTrader, StepOutcome, StepRecord};
use matching_engine::OrderBookSet;
use types::errors::EngineError;

/// Hook for reporting. Called synchronously from the scheduling loop.
pub trait SimObserver {
    /// A trader submitted one order. `universe` is quiescent.
    fn on_step(&mut self, _record: &StepRecord, _universe: &OrderBookSet) {}

    /// Round `round` (1-based) finished after `steps` trader steps.
    fn on_round_complete(&mut self, _round: u64, _steps: usize, _universe: &OrderBookSet) {}
}

impl SimObserver for () {}

impl<T: SimObserver + ?Sized> SimObserver for &mut T {
    fn on_step(&mut self, record: &StepRecord, universe: &OrderBookSet) {
        (**self).on_step(record, universe);
    }

    fn on_round_complete(&mut self, round: u64, steps: usize, universe: &OrderBookSet) {
        (**self).on_round_complete(round, steps, universe);
    }
}

impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_step(&mut self, record: &StepRecord, universe: &OrderBookSet) {
        self.0.on_step(record, universe);
        self.1.on_step(record, universe);
    }

    fn on_round_complete(&mut self, round: u64, steps: usize, universe: &OrderBookSet) {
        self.0.on_round_complete(round, steps, universe);
        self.1.on_round_complete(round, steps, universe);
    }
}

/// Round-robin driver over a fixed, index-ordered set of traders
#[derive(Debug, Clone)]
pub struct RoundRobinScheduler {
    traders: Vec<RandomTrader>,
    rounds: u64,
}

impl RoundRobinScheduler {
    pub fn new(traders: Vec<RandomTrader>) -> Self {
        Self { traders, rounds: 0 }
    }

    /// Resume every live trader once. Returns the number of steps taken.
    ///
    /// Finished traders are still polled; they report `Done` without drawing.
    pub fn run_round<O: SimObserver + ?Sized>(
        &mut self,
        universe: &mut OrderBookSet,
        observer: &mut O,
    ) -> Result<usize, EngineError> {
        let mut steps = 0;

        for trader in &mut self.traders {
            if let StepOutcome::Continue(record) = trader.step(universe)? {
                steps += 1;
                observer.on_step(&record, universe);
            }
        }

        if steps > 0 {
            self.rounds += 1;
            tracing::debug!(round = self.rounds, steps, live = self.live_count(), "Round complete");
            observer.on_round_complete(self.rounds, steps, universe);
        }

        Ok(steps)
    }

    /// Run rounds until one produces no steps. Returns the number of rounds with steps.
    pub fn run<O: SimObserver + ?Sized>(
        &mut self,
        universe: &mut OrderBookSet,
        observer: &mut O,
    ) -> Result<u64, EngineError> {
        while self.run_round(universe, observer)? > 0 {}
        Ok(self.rounds)
    }

    /// Traders that have not finished yet
    pub fn live_count(&self) -> usize {
        self.traders.iter().filter(|t| !t.is_done()).count()
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn traders(&self) -> &[RandomTrader] {
        &self.traders
    }
}
