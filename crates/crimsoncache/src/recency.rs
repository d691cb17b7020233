//! Least-recently-used eviction

use crate::entry::EntryId;
use crate::strategy::{EvictionStrategy, EvictionView};

/// Evicts the entry adjacent to the back sentinel
///
/// Every put, get and contains moves its entry to the front, so the back
/// entry is always the one touched least recently. O(1).
#[derive(Debug, Clone, Copy, Default)]
pub struct RecencyStrategy;

impl RecencyStrategy {
    /// Create a new LRU strategy
    pub fn new() -> Self {
        Self
    }
}

impl EvictionStrategy for RecencyStrategy {
    fn name(&self) -> &'static str {
        "lru"
    }

    fn select_victim(&mut self, view: &dyn EvictionView) -> Option<EntryId> {
        view.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrderedStore;

    #[test]
    fn test_recency_picks_back() {
        let mut store = OrderedStore::with_capacity(3);
        store.insert_front("k1", 1).unwrap();
        store.insert_front("k2", 2).unwrap();
        store.insert_front("k3", 3).unwrap();

        let victim = RecencyStrategy::new().select_victim(&store).unwrap();
        assert_eq!(store.key(victim), Some(&"k1"));
    }

    #[test]
    fn test_recency_follows_touches() {
        let mut store = OrderedStore::with_capacity(3);
        store.insert_front("k1", 1).unwrap();
        store.insert_front("k2", 2).unwrap();
        store.move_to_front(store.lookup("k1").unwrap());

        let victim = RecencyStrategy::new().select_victim(&store).unwrap();
        assert_eq!(store.key(victim), Some(&"k2"));
    }

    #[test]
    fn test_recency_empty_store() {
        let store: OrderedStore<&str, i32> = OrderedStore::with_capacity(1);
        assert_eq!(RecencyStrategy::new().select_victim(&store), None);
    }
}
