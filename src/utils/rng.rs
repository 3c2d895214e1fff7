//! Seedable random number generator for reproducible weight initialization.
//!
//! `SimpleRng` is a small xorshift generator that implements the `rand` core traits, so it
//! can be handed to anything that accepts a `rand::Rng`. Seeding is always explicit: either a
//! fixed seed through [`SimpleRng::new`] / `SeedableRng::seed_from_u64`, or the wall clock
//! through [`SimpleRng::from_time`].

use rand::{RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

// Xorshift has an all-zero fixed point, so a zero seed is replaced by this constant.
const ZERO_SEED_REPLACEMENT: u64 = 0x9e3779b97f4a7c15;

/// Xorshift generator with a settable seed.
///
/// Not cryptographic. Two generators built from the same seed yield identical streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a new RNG with explicit seed (if zero, use a fixed value).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { ZERO_SEED_REPLACEMENT } else { seed };
        Self { state }
    }

    /// Create a new RNG seeded from the current time.
    pub fn from_time() -> Self {
        let mut rng = Self::new(0);
        rng.reseed_from_time();
        rng
    }

    /// Reseed based on the current time.
    pub fn reseed_from_time(&mut self) {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        self.state = if nanos == 0 {
            ZERO_SEED_REPLACEMENT
        } else {
            nanos
        };
    }

    fn step(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl RngCore for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SimpleRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
