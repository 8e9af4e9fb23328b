//! Integer price and quantity types
//!
//! Both are whole numbers. Validation happens once, at the edge where raw
//! integers come in; past that point the newtypes guarantee the bounds.

use crate::errors::OrderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Limit price of an order
///
/// Never negative. Zero is a valid (if unattractive) price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Validate a raw price
    pub fn try_new(raw: i64) -> Result<Self, OrderError> {
        if raw < 0 {
            return Err(OrderError::InvalidPrice(raw));
        }
        Ok(Self(raw as u64))
    }

    pub const fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order quantity in whole units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    /// Validate a raw order quantity (must be strictly positive)
    pub fn try_new(raw: i64) -> Result<Self, OrderError> {
        if raw <= 0 {
            return Err(OrderError::InvalidQuantity(raw));
        }
        Ok(Self(raw as u64))
    }

    pub const fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        Quantity(self.0 + rhs.0)
    }
}

impl Sub for Quantity {
    type Output = Quantity;

    /// # Panics
    /// Panics if `rhs` exceeds `self`; a fill can never exceed what is resting.
    fn sub(self, rhs: Quantity) -> Quantity {
        assert!(
            rhs.0 <= self.0,
            "quantity underflow: fill exceeds resting quantity"
        );
        Quantity(self.0 - rhs.0)
    }
}

impl std::iter::Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Quantity {
        iter.fold(Quantity::zero(), |acc, q| acc + q)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
