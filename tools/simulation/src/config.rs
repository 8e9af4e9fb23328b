//! Simulation configuration
//!
//! Defaults reproduce the reference run: 5 traders, 10 transactions each,
//! 1024 instruments. Values can come from a JSON file, environment variables
//! and positional arguments, applied in that order.

use crate::bots::TraderConfig;
use crate::rng::BASE_SEED;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_TRADERS: u32 = 5;
pub const DEFAULT_TRANSACTIONS: u32 = 10;
pub const DEFAULT_INSTRUMENTS: usize = 1024;

pub const ENV_TRADERS: &str = "SIM_TRADERS";
pub const ENV_TRANSACTIONS: &str = "SIM_TRANSACTIONS";
pub const ENV_INSTRUMENTS: &str = "SIM_INSTRUMENTS";
pub const ENV_SEED: &str = "SIM_SEED";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("At least one trader is required")]
    NoTraders,

    #[error("Instrument universe must have at least one slot")]
    EmptyUniverse,

    #[error("Invalid order bounds: {0}")]
    InvalidBounds(String),

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parameters of one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub num_traders: u32,
    pub transactions_per_trader: u32,
    pub instrument_count: usize,
    /// Seed of trader 0; trader `i` uses `base_seed + i`
    pub base_seed: u64,
    /// Order bounds shared by every trader
    pub orders: TraderConfig,
    /// Print each order and the resulting books while running
    pub print_every_step: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_traders: DEFAULT_TRADERS,
            transactions_per_trader: DEFAULT_TRANSACTIONS,
            instrument_count: DEFAULT_INSTRUMENTS,
            base_seed: BASE_SEED,
            orders: TraderConfig::default(),
            print_every_step: false,
        }
    }
}

impl SimConfig {
    pub fn new(num_traders: u32, transactions_per_trader: u32, instrument_count: usize) -> Self {
        Self {
            num_traders,
            transactions_per_trader,
            instrument_count,
            ..Self::default()
        }
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Override fields from `SIM_*` environment variables
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Override fields from any key lookup using the `SIM_*` key names
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_TRADERS) {
            self.num_traders = parse_value(ENV_TRADERS, &value)?;
        }
        if let Some(value) = lookup(ENV_TRANSACTIONS) {
            self.transactions_per_trader = parse_value(ENV_TRANSACTIONS, &value)?;
        }
        if let Some(value) = lookup(ENV_INSTRUMENTS) {
            self.instrument_count = parse_value(ENV_INSTRUMENTS, &value)?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            self.base_seed = parse_value(ENV_SEED, &value)?;
        }
        Ok(self)
    }

    /// Apply positional arguments `[traders] [transactions] [instruments]`
    pub fn with_args<I, S>(mut self, args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        if let Some(arg) = args.next() {
            self.num_traders = parse_value("traders", arg.as_ref())?;
        }
        if let Some(arg) = args.next() {
            self.transactions_per_trader = parse_value("transactions", arg.as_ref())?;
        }
        if let Some(arg) = args.next() {
            self.instrument_count = parse_value("instruments", arg.as_ref())?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_traders == 0 {
            return Err(ConfigError::NoTraders);
        }
        if self.instrument_count == 0 {
            return Err(ConfigError::EmptyUniverse);
        }

        let orders = &self.orders;
        if orders.min_quantity == 0
            || orders.min_quantity > orders.max_quantity
            || orders.max_quantity > i64::MAX as u64
        {
            return Err(ConfigError::InvalidBounds(format!(
                "quantity {}..={}",
                orders.min_quantity, orders.max_quantity
            )));
        }
        if orders.min_price > orders.max_price || orders.max_price > i64::MAX as u64 {
            return Err(ConfigError::InvalidBounds(format!(
                "price {}..={}",
                orders.min_price, orders.max_price
            )));
        }
        Ok(())
    }

    /// Seed of the trader at `index`
    pub fn trader_seed(&self, index: u32) -> u64 {
        self.base_seed.wrapping_add(u64::from(index))
    }

    /// Orders the run will submit in total
    pub fn total_orders(&self) -> u64 {
        u64::from(self.num_traders) * u64::from(self.transactions_per_trader)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();

        assert_eq!(config.num_traders, 5);
        assert_eq!(config.transactions_per_trader, 10);
        assert_eq!(config.instrument_count, 1024);
        assert_eq!(config.base_seed, 123_456_789);
        assert_eq!(config.total_orders(), 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimConfig::from_json_str(r#"{"num_traders": 2, "base_seed": 7}"#).unwrap();

        assert_eq!(config.num_traders, 2);
        assert_eq!(config.base_seed, 7);
        assert_eq!(config.instrument_count, 1024);
        assert_eq!(config.orders, TraderConfig::default());
    }

    #[test]
    fn test_partial_order_bounds_keep_defaults() {
        let config = SimConfig::from_json_str(r#"{"orders": {"max_price": 500}}"#).unwrap();

        assert_eq!(config.orders.max_price, 500);
        assert_eq!(config.orders.min_price, 10);
        assert_eq!(config.orders.min_quantity, 1);
        assert_eq!(config.orders.max_quantity, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_json() {
        let err = SimConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SimConfig::from_json_file("/nonexistent/sim.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [(ENV_TRADERS, "3"), (ENV_INSTRUMENTS, " 4 ")].into();
        let config = SimConfig::default()
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.num_traders, 3);
        assert_eq!(config.transactions_per_trader, 10);
        assert_eq!(config.instrument_count, 4);
    }

    #[test]
    fn test_bad_override() {
        let err = SimConfig::default()
            .apply_overrides(|key| (key == ENV_SEED).then(|| "abc".to_string()))
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == ENV_SEED));
    }

    #[test]
    fn test_positional_args() {
        let config = SimConfig::default().with_args(["1", "10"]).unwrap();

        assert_eq!(config.num_traders, 1);
        assert_eq!(config.transactions_per_trader, 10);
        assert_eq!(config.instrument_count, 1024);

        assert!(SimConfig::default().with_args(["-2"]).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(matches!(
            SimConfig::new(0, 10, 4).validate(),
            Err(ConfigError::NoTraders)
        ));
        assert!(matches!(
            SimConfig::new(1, 10, 0).validate(),
            Err(ConfigError::EmptyUniverse)
        ));
        // Zero transactions is a valid, empty run
        assert!(SimConfig::new(1, 0, 4).validate().is_ok());

        let mut config = SimConfig::default();
        config.orders.min_quantity = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBounds(_))));

        // Bounds must fit the engine's signed order fields
        let mut config = SimConfig::default();
        config.orders.max_quantity = i64::MAX as u64 + 1;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBounds(_))));
        config.orders.max_quantity = i64::MAX as u64;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_trader_seed() {
        let config = SimConfig::default();
        assert_eq!(config.trader_seed(0), 123_456_789);
        assert_eq!(config.trader_seed(4), 123_456_793);
    }
}
