//! Injectable uniform random sources used by every generation step.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

/// A source of uniform values in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Seeded ChaCha stream; the production source.
#[derive(Clone, Debug)]
pub struct ChaChaSource {
    rng: ChaCha8Rng,
}

impl ChaChaSource {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl RandomSource for ChaChaSource {
    fn next_f64(&mut self) -> f64 {
        // 53 significant bits map exactly onto the f64 mantissa.
        (self.rng.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }
}

/// Replays a fixed sequence of draws, cycling once it runs out.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self { values: values.into(), cursor: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    pub fn draws_taken(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        clamp_unit(value)
    }
}

/// Uniform index in `0..len`; `len` must be non-zero.
pub fn uniform_index(rng: &mut impl RandomSource, len: usize) -> usize {
    debug_assert!(len > 0);
    let scaled = (rng.next_f64() * len as f64).floor() as usize;
    scaled.min(len.saturating_sub(1))
}

/// Uniform integer in the closed range `[min_value, max_value]`.
pub fn uniform_range(rng: &mut impl RandomSource, min_value: usize, max_value: usize) -> usize {
    debug_assert!(min_value <= max_value);
    min_value + uniform_index(rng, max_value - min_value + 1)
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else if value >= 1.0 {
        1.0 - f64::EPSILON
    } else {
        value
    }
}
