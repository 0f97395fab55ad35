//! Injectable randomness.
//!
//! Every generator draws through [`RandomSource`]. It is implemented for
//! `rand`'s thread RNG (the default) and for [`StdRng`], which [`seeded`]
//! builds from a `u64` when output has to be reproducible.

use rand::{Rng, SeedableRng};

pub use rand::rngs::{StdRng, ThreadRng};

/// A source of uniform floats in [0, 1).
pub trait RandomSource {
    /// Next float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64;

    /// Uniform float in [lo, hi).
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        (hi - lo).mul_add(self.next_f64(), lo)
    }

    /// Symmetric jitter in [-amount, amount).
    fn jitter(&mut self, amount: f64) -> f64 {
        self.range(-amount, amount)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index() on an empty range");
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }

    /// Pick a random element from a slice. `None` when empty.
    fn pick<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if slice.is_empty() {
            None
        } else {
            Some(&slice[self.index(slice.len())])
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

// ---------------------------------------------------------------------------
// rand-backed sources
// ---------------------------------------------------------------------------

/// The default, non-reproducible source: the thread-local RNG.
impl RandomSource for ThreadRng {
    fn next_f64(&mut self) -> f64 {
        self.r#gen::<f64>()
    }
}

/// The reproducible source. Build one with [`seeded`].
impl RandomSource for StdRng {
    fn next_f64(&mut self) -> f64 {
        self.r#gen::<f64>()
    }
}

/// A fresh thread-local source.
#[must_use]
pub fn thread_source() -> ThreadRng {
    rand::thread_rng()
}

/// A deterministic source: equal seeds give equal palettes.
#[must_use]
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
