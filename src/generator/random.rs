use rand::Rng;
use std::ops::RangeInclusive;

/// Source of uniform random draws used by every generation strategy
pub trait RandomSource: Send + Sync {
    /// Uniform integer in the inclusive range
    fn int_in(&self, range: RangeInclusive<u32>) -> u32;

    /// Uniform index in `0..len`; returns 0 when `len` is 0
    fn index(&self, len: usize) -> usize;
}

/// Picks one entry uniformly, or the empty string for an empty list
pub fn choose<'a>(rng: &dyn RandomSource, items: &[&'a str]) -> &'a str {
    items.get(rng.index(items.len())).copied().unwrap_or_default()
}

/// Thread-local `rand` generator
pub struct ThreadRandom;

impl ThreadRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn int_in(&self, range: RangeInclusive<u32>) -> u32 {
        rand::rng().random_range(range)
    }

    fn index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::rng().random_range(0..len)
    }
}

/// Deterministic source that always answers with the same value,
/// clamped into the requested range
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub u32);

impl RandomSource for FixedRandom {
    fn int_in(&self, range: RangeInclusive<u32>) -> u32 {
        self.0.clamp(*range.start(), *range.end())
    }

    fn index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.0 as usize % len
    }
}
