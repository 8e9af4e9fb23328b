//! Deterministic linear congruential random stream
//!
//! Every trader owns one `LcgStream`. The recurrence, its constants and the
//! way values are derived from it are fixed, so a given seed always yields
//! the same orders on every platform and every run.

use rand::{Error, RngCore, SeedableRng};

pub const LCG_MULTIPLIER: u64 = 1_103_515_245;
pub const LCG_INCREMENT: u64 = 12_345;
pub const LCG_MODULUS: u64 = 1 << 31;

/// Seed of trader 0; trader `i` starts from `BASE_SEED + i`
pub const BASE_SEED: u64 = 123_456_789;

/// One step of the recurrence: `(a * seed + c) mod 2^31`
///
/// Wrapping arithmetic is exact here because the modulus is a power of two
/// and only the low 31 bits survive.
pub fn lcg_next(seed: u64) -> u64 {
    LCG_MULTIPLIER
        .wrapping_mul(seed)
        .wrapping_add(LCG_INCREMENT)
        & (LCG_MODULUS - 1)
}

/// Stateful wrapper around [`lcg_next`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcgStream {
    seed: u64,
}

impl LcgStream {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Stream for the trader at `index`
    pub fn for_trader(base_seed: u64, index: u32) -> Self {
        Self::new(base_seed.wrapping_add(u64::from(index)))
    }

    /// Current seed (the last value drawn, or the initial seed)
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Advance once and return the new seed
    pub fn next_seed(&mut self) -> u64 {
        self.seed = lcg_next(self.seed);
        self.seed
    }

    /// Binary decision from one draw: `true` when the draw lands in the lower
    /// half of the modulus
    ///
    /// The high half is used instead of the low bit: the low bit of this LCG
    /// alternates with period two.
    pub fn draw_lower_half(&mut self) -> bool {
        self.next_seed() < LCG_MODULUS / 2
    }

    /// Index into `n` items from one draw
    ///
    /// # Panics
    /// Panics if `n` is zero.
    pub fn draw_index(&mut self, n: usize) -> usize {
        assert!(n > 0, "cannot draw an index into zero items");
        (self.next_seed() % n as u64) as usize
    }

    /// Integer in `low..=high` from one draw
    ///
    /// # Panics
    /// Panics if `low > high`.
    pub fn draw_inclusive(&mut self, low: u64, high: u64) -> u64 {
        assert!(low <= high, "empty range {low}..={high}");
        let draw = self.next_seed();
        match (high - low).checked_add(1) {
            Some(span) => draw % span + low,
            // Full u64 span: every draw is already in range
            None => draw,
        }
    }
}

/// Yields the raw 31-bit seeds; the top bit of every `u32` is always zero.
impl RngCore for LcgStream {
    fn next_u32(&mut self) -> u32 {
        self.next_seed() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_u32());
        let high = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for LcgStream {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    /// Uses the value as the seed directly, unlike the default which mixes it
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
