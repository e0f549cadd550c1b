// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Random-order providers.
//!
//! The search order and every candidate list are shuffled once before the
//! search starts. Where that randomness comes from is a parameter: production
//! runs use thread entropy, reproducible runs use a seeded ChaCha stream, and
//! tests that need exact answers keep the input order untouched.

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Source of the orderings used by the candidate builder.
pub trait OrderSource {
    /// Permute `items` in place.
    fn shuffle(&mut self, items: &mut [usize]);
}

impl<T: OrderSource + ?Sized> OrderSource for &mut T {
    fn shuffle(&mut self, items: &mut [usize]) {
        (**self).shuffle(items)
    }
}

/// Fresh randomness on every run.
#[derive(Debug)]
pub struct EntropyOrder {
    rng: ThreadRng,
}

impl EntropyOrder {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for EntropyOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderSource for EntropyOrder {
    fn shuffle(&mut self, items: &mut [usize]) {
        SliceRandom::shuffle(items, &mut self.rng);
    }
}

/// Reproducible orderings from a 64-bit seed.
#[derive(Debug, Clone)]
pub struct SeededOrder {
    rng: ChaCha8Rng,
}

impl SeededOrder {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl OrderSource for SeededOrder {
    fn shuffle(&mut self, items: &mut [usize]) {
        SliceRandom::shuffle(items, &mut self.rng);
    }
}

/// Leaves every ordering as given.
///
/// With this source the search order is the roster order and each candidate
/// list follows the roster order too, so results are fully predictable.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepOrder;

impl OrderSource for KeepOrder {
    fn shuffle(&mut self, _items: &mut [usize]) {}
}

/// Rotates every list left by one position.
///
/// Deterministic, but unlike [`KeepOrder`] it moves things around, which
/// makes it handy for checking that callers really use the shuffled order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotateOrder;

impl OrderSource for RotateOrder {
    fn shuffle(&mut self, items: &mut [usize]) {
        if !items.is_empty() {
            items.rotate_left(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_order_is_identity() {
        let mut items = vec![0, 1, 2, 3];
        KeepOrder.shuffle(&mut items);
        assert_eq!(items, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_rotate_order() {
        let mut items = vec![0, 1, 2, 3];
        RotateOrder.shuffle(&mut items);
        assert_eq!(items, vec![1, 2, 3, 0]);

        let mut empty: Vec<usize> = vec![];
        RotateOrder.shuffle(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_seeded_order_is_reproducible() {
        let mut a = SeededOrder::new(42);
        let mut b = SeededOrder::new(42);
        for _ in 0..5 {
            let mut xs: Vec<usize> = (0..20).collect();
            let mut ys: Vec<usize> = (0..20).collect();
            a.shuffle(&mut xs);
            b.shuffle(&mut ys);
            assert_eq!(xs, ys);
        }
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut source = EntropyOrder::new();
        let mut items: Vec<usize> = (0..50).collect();
        source.shuffle(&mut items);
        items.sort_unstable();
        assert_eq!(items, (0..50).collect::<Vec<_>>());
    }
}
