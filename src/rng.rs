//! Random source for column timing.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use web_sys::window;

/// Source of uniform timing values.
pub trait RandomSource {
    /// Uniform value in `[min, max)`. Callers guarantee `min < max`.
    fn in_range(&mut self, min: f64, max: f64) -> f64;
}

/// Uniform value in `[min, max)`; exactly `min` when the bounds are equal.
pub fn uniform<R: RandomSource + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    rng.in_range(min, max)
}

/// Small fast PRNG, deterministic for a given seed. Not crypto secure.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }

    /// Seed from browser entropy, falling back to `performance.now()`.
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed().unwrap_or_else(clock_seed))
    }
}

impl RandomSource for SeededRandom {
    fn in_range(&mut self, min: f64, max: f64) -> f64 {
        self.rng.random_range(min..max)
    }
}

#[cfg(feature = "rng")]
fn entropy_seed() -> Option<u64> {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => Some(u64::from_le_bytes(buf)),
        Err(err) => {
            tracing::warn!(%err, "entropy unavailable, seeding rain from clock");
            None
        }
    }
}

#[cfg(not(feature = "rng"))]
fn entropy_seed() -> Option<u64> {
    None
}

fn clock_seed() -> u64 {
    let now = window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    now.to_bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Always returns the midpoint of the requested range.
    struct Midpoint;

    impl RandomSource for Midpoint {
        fn in_range(&mut self, min: f64, max: f64) -> f64 {
            min + (max - min) / 2.0
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRandom::new(7);
        let mut b = SeededRandom::new(7);
        for _ in 0..32 {
            assert_eq!(a.in_range(0.0, 1.0), b.in_range(0.0, 1.0));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededRandom::new(1);
        let mut b = SeededRandom::new(2);
        let xs: Vec<f64> = (0..8).map(|_| a.in_range(5.0, 10.0)).collect();
        let ys: Vec<f64> = (0..8).map(|_| b.in_range(5.0, 10.0)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn draws_stay_in_half_open_interval() {
        let mut rng = SeededRandom::new(0xDEAD_BEEF);
        for _ in 0..10_000 {
            let d = uniform(&mut rng, 5.0, 10.0);
            assert!((5.0..10.0).contains(&d), "duration {d} out of range");
            let u = uniform(&mut rng, 0.0, 5.0);
            assert!((0.0..5.0).contains(&u), "delay {u} out of range");
        }
    }

    #[test]
    fn uniform_passes_range_through_and_pins_equal_bounds() {
        assert_eq!(uniform(&mut Midpoint, 5.0, 10.0), 7.5);
        assert_eq!(uniform(&mut Midpoint, 0.0, 5.0), 2.5);
        // equal bounds never reach the source
        assert_eq!(uniform(&mut SeededRandom::new(3), 3.0, 3.0), 3.0);
    }
}
