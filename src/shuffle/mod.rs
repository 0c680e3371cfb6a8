//! Shuffle — non-repeating selection over the background pool.
//!
//! The engine owns a permutation of pool indices and a cursor into it. Each
//! draw hands out the next index, so every image is shown once before any
//! image repeats. When the cursor runs off the end it wraps and the same order
//! is replayed; only a change in pool size or an explicit `reset` produces a
//! new permutation.
//!
//! The engine never fails. An empty pool yields `None`, a size change is
//! absorbed by reshuffling, and an out-of-range index heals itself.

use log::{debug, error, warn};
use rand::{Rng, rngs::ThreadRng};

use crate::pool::PoolSupplier;
use crate::types::LOG_TAG;

#[derive(Debug)]
pub struct ShuffleEngine<S, R = ThreadRng> {
    supplier: S,
    permutation: Vec<usize>,
    cursor: usize,
    last_known_size: usize,
    rng: R,
}

impl<S: PoolSupplier> ShuffleEngine<S> {
    /// Create an engine drawing from `supplier`, shuffled with the
    /// entropy-seeded thread-local generator.
    pub fn new(supplier: S) -> Self {
        Self::with_rng(supplier, rand::rng())
    }
}

impl<S: PoolSupplier, R: Rng> ShuffleEngine<S, R> {
    pub fn with_rng(supplier: S, rng: R) -> Self {
        Self {
            supplier,
            permutation: Vec::new(),
            cursor: 0,
            last_known_size: 0,
            rng,
        }
    }

    /// Draw the next image of the current cycle.
    ///
    /// Returns `None` while the pool is absent or empty.
    pub fn next_image(&mut self) -> Option<S::Image> {
        let size = self.pool_size();
        let index = self.next_index(size)?;
        self.supplier
            .available_images()
            .and_then(|images| images.get(index))
            .cloned()
    }

    /// Forget the current permutation. The next draw shuffles afresh.
    ///
    /// The last observed pool size is kept so the next draw is not also
    /// reported as a size change.
    pub fn reset(&mut self) {
        debug!("{LOG_TAG} Shuffle state reset");
        self.permutation.clear();
        self.cursor = 0;
    }

    pub fn supplier(&self) -> &S {
        &self.supplier
    }

    /// Mutable access for recapturing the pool in place.
    pub fn supplier_mut(&mut self) -> &mut S {
        &mut self.supplier
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    pub fn last_known_size(&self) -> usize {
        self.last_known_size
    }

    fn pool_size(&self) -> usize {
        self.supplier.available_images().map_or(0, <[_]>::len)
    }

    fn next_index(&mut self, size: usize) -> Option<usize> {
        if size == 0 {
            if !self.permutation.is_empty() {
                debug!("{LOG_TAG} Pool emptied; dropping permutation");
                self.permutation.clear();
                self.cursor = 0;
            }
            return None;
        }

        if size != self.last_known_size {
            debug!(
                "{LOG_TAG} Pool size changed from {} to {size}; reshuffling",
                self.last_known_size
            );
            self.reshuffle(size);
        } else if self.permutation.is_empty() {
            self.reshuffle(size);
        }

        if self.cursor >= self.permutation.len() {
            debug!("{LOG_TAG} Completed a full cycle of {size} images; starting over");
            self.cursor = 0;
        }

        let index = self.permutation[self.cursor];
        if index >= size {
            error!(
                "{LOG_TAG} Shuffled index {index} out of range for pool of {size}; reshuffling"
            );
            self.reshuffle(size);
            self.cursor = 1;
            return Some(self.permutation[0]);
        }

        self.cursor += 1;
        debug!(
            "{LOG_TAG} Selected index {index} (position {} of {size})",
            self.cursor
        );
        Some(index)
    }

    /// Fisher–Yates over `[0, size)`. Resets the cursor.
    fn reshuffle(&mut self, size: usize) {
        self.cursor = 0;
        self.last_known_size = size;
        self.permutation.clear();

        if size == 0 {
            warn!("{LOG_TAG} Cannot shuffle an empty pool");
            return;
        }

        self.permutation.extend(0..size);
        for i in (1..size).rev() {
            let j = self.rng.random_range(0..=i);
            self.permutation.swap(i, j);
        }
        debug!("{LOG_TAG} Shuffled {size} backgrounds");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use test_log::test;

    fn engine<T: Clone>(pool: Vec<T>, seed: u64) -> ShuffleEngine<Vec<T>, StdRng> {
        ShuffleEngine::with_rng(pool, StdRng::seed_from_u64(seed))
    }

    fn draw<T: Clone>(engine: &mut ShuffleEngine<Vec<T>, StdRng>, n: usize) -> Vec<T> {
        (0..n).map(|_| engine.next_image().unwrap()).collect()
    }

    #[test]
    fn one_cycle_covers_every_image_once() {
        for n in 1..=12 {
            let mut e = engine((0..n).collect(), n as u64);
            let mut drawn = draw(&mut e, n);
            drawn.sort_unstable();
            assert_eq!(drawn, (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn second_cycle_replays_first() {
        let mut e = engine((0..7).collect(), 11);
        let first = draw(&mut e, 7);
        let second = draw(&mut e, 7);
        assert_eq!(first, second);
    }

    #[test]
    fn size_change_discards_remaining_cycle() {
        let mut e = engine((0..5).collect(), 3);
        draw(&mut e, 2);

        *e.supplier_mut() = vec![10, 11, 12];
        let mut drawn = draw(&mut e, 3);
        assert_eq!(e.last_known_size(), 3);
        drawn.sort_unstable();
        assert_eq!(drawn, vec![10, 11, 12]);
    }

    #[test]
    fn empty_pool_yields_none_forever() {
        let mut e = engine(Vec::<u8>::new(), 0);
        for _ in 0..100 {
            assert_eq!(e.next_image(), None);
        }
        assert!(e.permutation().is_empty());
        assert_eq!(e.cursor(), 0);
    }

    #[test]
    fn pool_emptied_mid_cycle() {
        let mut e = engine(vec!['a', 'b', 'c'], 5);
        draw(&mut e, 1);
        e.supplier_mut().clear();
        assert_eq!(e.next_image(), None);
        assert!(e.permutation().is_empty());

        *e.supplier_mut() = vec!['a', 'b', 'c'];
        let mut drawn = draw(&mut e, 3);
        drawn.sort_unstable();
        assert_eq!(drawn, vec!['a', 'b', 'c']);
    }

    #[test]
    fn reset_keeps_last_known_size_and_reshuffles() {
        let mut e = engine((0..4).collect(), 9);
        draw(&mut e, 3);
        e.reset();
        assert!(e.permutation().is_empty());
        assert_eq!(e.cursor(), 0);
        assert_eq!(e.last_known_size(), 4);

        let mut drawn = draw(&mut e, 4);
        drawn.sort_unstable();
        assert_eq!(drawn, vec![0, 1, 2, 3]);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut e = engine((0..3).collect(), 1);
        for _ in 0..10 {
            e.next_image();
            assert!(e.cursor() <= e.permutation().len());
            assert!(e.cursor() >= 1);
        }
    }

    #[test]
    fn out_of_range_index_heals() {
        let mut e = engine((0..4).collect(), 2);
        draw(&mut e, 1);
        e.permutation[1] = 99;

        let healed = e.next_image().unwrap();
        assert!(healed < 4);
        assert_eq!(e.cursor(), 1);
        assert_eq!(healed, e.permutation()[0]);

        let mut sorted = e.permutation().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
    }

    #[test]
    fn three_then_four_scenario() {
        let mut e = engine(vec!['A', 'B', 'C'], 42);
        let cycle = draw(&mut e, 3);
        assert_eq!(cycle.iter().collect::<HashSet<_>>().len(), 3);
        assert_eq!(e.next_image(), Some(cycle[0]));

        e.supplier_mut().push('D');
        let next = draw(&mut e, 4);
        let mut sorted = next.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec!['A', 'B', 'C', 'D']);
    }

    #[test]
    fn orderings_are_roughly_uniform() {
        let mut e = engine(vec![0u8, 1, 2], 2024);
        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();
        for _ in 0..6000 {
            e.reset();
            *counts.entry(draw(&mut e, 3)).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        for (order, count) in counts {
            assert!((800..1200).contains(&count), "{order:?} drawn {count} times");
        }
    }

    #[test]
    fn borrowed_supplier() {
        let pool = vec![1, 2];
        let mut e = ShuffleEngine::with_rng(&pool, StdRng::seed_from_u64(0));
        let mut drawn = vec![e.next_image().unwrap(), e.next_image().unwrap()];
        drawn.sort_unstable();
        assert_eq!(drawn, vec![1, 2]);
    }
}
