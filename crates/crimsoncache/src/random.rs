//! Uniform random eviction

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entry::EntryId;
use crate::strategy::{EvictionStrategy, EvictionView};

/// Evicts a uniformly random candidate, ignoring recency
///
/// Walks from the front to the drawn position, so selection is O(capacity).
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// Create a strategy seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a strategy with a fixed seed for reproducible eviction order
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl EvictionStrategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select_victim(&mut self, view: &dyn EvictionView) -> Option<EntryId> {
        let size = view.size();
        if size == 0 {
            return None;
        }
        view.nth(self.rng.random_range(0..size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrderedStore;

    #[test]
    fn test_random_picks_occupant() {
        let mut store = OrderedStore::with_capacity(4);
        for key in 0..4u32 {
            store.insert_front(key, ()).unwrap();
        }

        let mut strategy = RandomStrategy::with_seed(7);
        for _ in 0..100 {
            let victim = strategy.select_victim(&store).unwrap();
            assert!(store.key(victim).is_some());
        }
    }

    #[test]
    fn test_random_covers_every_position() {
        let mut store = OrderedStore::with_capacity(3);
        for key in 0..3u32 {
            store.insert_front(key, ()).unwrap();
        }

        let mut strategy = RandomStrategy::with_seed(42);
        let mut seen = [false; 3];
        for _ in 0..1000 {
            let victim = strategy.select_victim(&store).unwrap();
            seen[*store.key(victim).unwrap() as usize] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_random_same_seed_same_choices() {
        let mut store = OrderedStore::with_capacity(8);
        for key in 0..8u32 {
            store.insert_front(key, ()).unwrap();
        }

        let mut a = RandomStrategy::with_seed(3);
        let mut b = RandomStrategy::with_seed(3);
        for _ in 0..50 {
            assert_eq!(a.select_victim(&store), b.select_victim(&store));
        }
    }

    #[test]
    fn test_random_empty_store() {
        let store: OrderedStore<u32, ()> = OrderedStore::with_capacity(1);
        assert_eq!(RandomStrategy::new().select_victim(&store), None);
    }
}
