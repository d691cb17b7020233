//! Ordered entry store
//!
//! Arena-backed doubly-linked sequence paired with a key map. Lookup,
//! move-to-front and removal are all O(1).

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

use crate::entry::{attach_after, detach, Entry, EntryId, BACK, FRONT};
use crate::error::{Error, Result};
use crate::strategy::EvictionView;

/// Entries ordered from most recently touched (front) to least (back)
pub struct OrderedStore<K, V> {
    map: HashMap<K, usize, RandomState>,
    nodes: Vec<Entry<K, V>>,
    free_list: Vec<usize>,
}

impl<K, V> OrderedStore<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty store with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 2);
        nodes.push(Entry::sentinel(FRONT, BACK));
        nodes.push(Entry::sentinel(FRONT, BACK));

        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            nodes,
            free_list: Vec::new(),
        }
    }

    /// Insert a new entry at the front
    ///
    /// # Returns
    /// * `Err(Error::DuplicateKey)` if the key is already present
    pub fn insert_front(&mut self, key: K, value: V) -> Result<EntryId> {
        if self.map.contains_key(&key) {
            return Err(Error::DuplicateKey);
        }

        let idx = self.alloc_node(Entry::occupied(key.clone(), value));
        attach_after(&mut self.nodes, FRONT, idx);
        self.map.insert(key, idx);

        Ok(EntryId(idx))
    }

    /// Find the entry for `key` without changing the ordering
    pub fn lookup<Q>(&self, key: &Q) -> Option<EntryId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).map(|&idx| EntryId(idx))
    }

    /// Move an entry to the front of the ordering
    ///
    /// No-op when `id` does not name a live entry.
    pub fn move_to_front(&mut self, id: EntryId) {
        let idx = id.0;
        if !self.nodes.get(idx).is_some_and(Entry::is_live) {
            return;
        }
        if self.nodes[FRONT].next == idx {
            return; // Already at front
        }

        detach(&mut self.nodes, idx);
        attach_after(&mut self.nodes, FRONT, idx);
    }

    /// Remove an entry from both the ordering and the key map
    ///
    /// Returns `None` when `id` does not name a live entry.
    pub fn remove(&mut self, id: EntryId) -> Option<(K, V)> {
        let idx = id.0;
        if !self.nodes.get(idx).is_some_and(Entry::is_live) {
            return None;
        }

        detach(&mut self.nodes, idx);
        let (key, value) = self.nodes[idx].data.take()?;
        self.map.remove(&key);
        self.free_list.push(idx);

        Some((key, value))
    }

    /// Least recently positioned entry
    pub fn back(&self) -> Option<EntryId> {
        self.live(self.nodes[BACK].prev)
    }

    /// Entry `index` steps from the front (0 is the front-most entry)
    pub fn nth(&self, index: usize) -> Option<EntryId> {
        if index >= self.size() {
            return None;
        }

        let mut cur = self.nodes[FRONT].next;
        for _ in 0..index {
            cur = self.nodes[cur].next;
        }
        self.live(cur)
    }

    /// Number of live entries
    pub fn size(&self) -> usize {
        self.map.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Key of a live entry
    pub fn key(&self, id: EntryId) -> Option<&K> {
        self.nodes.get(id.0)?.data.as_ref().map(|(k, _)| k)
    }

    /// Value of a live entry
    pub fn value(&self, id: EntryId) -> Option<&V> {
        self.nodes.get(id.0)?.data.as_ref().map(|(_, v)| v)
    }

    /// Mutable value of a live entry
    pub fn value_mut(&mut self, id: EntryId) -> Option<&mut V> {
        self.nodes.get_mut(id.0)?.data.as_mut().map(|(_, v)| v)
    }

    /// Iterate entries from front to back
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            cur: self.nodes[FRONT].next,
        }
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.map.clear();
        self.nodes.truncate(2);
        self.nodes[FRONT].next = BACK;
        self.nodes[BACK].prev = FRONT;
        self.free_list.clear();
    }

    /// Verify that the linked ordering and the key map agree
    pub fn check_invariants(&self) -> Result<()> {
        let mut forward = Vec::with_capacity(self.size());
        let mut cur = self.nodes[FRONT].next;
        while cur != BACK {
            if forward.len() > self.size() {
                return Err(Error::Invariant(format!(
                    "forward walk exceeds {} entries",
                    self.size()
                )));
            }
            let key = match &self.nodes[cur].data {
                Some((key, _)) => key,
                None => {
                    return Err(Error::Invariant(format!(
                        "slot {} is linked but holds no entry",
                        cur
                    )))
                }
            };
            if self.map.get(key) != Some(&cur) {
                return Err(Error::Invariant(format!(
                    "slot {} is linked but not mapped",
                    cur
                )));
            }
            forward.push(cur);
            cur = self.nodes[cur].next;
        }

        if forward.len() != self.size() {
            return Err(Error::Invariant(format!(
                "ordering holds {} entries, key map holds {}",
                forward.len(),
                self.size()
            )));
        }

        let mut cur = self.nodes[BACK].prev;
        for &expected in forward.iter().rev() {
            if cur != expected {
                return Err(Error::Invariant(format!(
                    "backward walk reached slot {}, expected {}",
                    cur, expected
                )));
            }
            cur = self.nodes[cur].prev;
        }
        if cur != FRONT {
            return Err(Error::Invariant(
                "backward walk did not end at the front sentinel".to_string(),
            ));
        }

        Ok(())
    }

    fn live(&self, idx: usize) -> Option<EntryId> {
        self.nodes[idx].is_live().then_some(EntryId(idx))
    }

    fn alloc_node(&mut self, node: Entry<K, V>) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx] = node;
            idx
        } else {
            self.nodes.push(node);
            self.nodes.len() - 1
        }
    }
}

impl<K, V> EvictionView for OrderedStore<K, V>
where
    K: Hash + Eq + Clone,
{
    fn back(&self) -> Option<EntryId> {
        OrderedStore::back(self)
    }

    fn nth(&self, index: usize) -> Option<EntryId> {
        OrderedStore::nth(self, index)
    }

    fn size(&self) -> usize {
        OrderedStore::size(self)
    }
}

/// Front-to-back iterator over a store
pub struct Iter<'a, K, V> {
    nodes: &'a [Entry<K, V>],
    cur: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur == BACK {
            return None;
        }
        let node = &self.nodes[self.cur];
        self.cur = node.next;
        node.data.as_ref().map(|(k, v)| (k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(store: &OrderedStore<u32, &'static str>) -> Vec<u32> {
        store.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_store_insert_front() {
        let mut store = OrderedStore::with_capacity(4);

        store.insert_front(1, "a").unwrap();
        store.insert_front(2, "b").unwrap();
        store.insert_front(3, "c").unwrap();

        assert_eq!(keys(&store), vec![3, 2, 1]);
        assert_eq!(store.size(), 3);
        store.check_invariants().unwrap();
    }

    #[test]
    fn test_store_duplicate_key() {
        let mut store = OrderedStore::with_capacity(2);

        store.insert_front(1, "a").unwrap();
        assert_eq!(store.insert_front(1, "b"), Err(Error::DuplicateKey));
        assert_eq!(store.size(), 1);

        let id = store.lookup(&1).unwrap();
        assert_eq!(store.value(id), Some(&"a"));
    }

    #[test]
    fn test_store_lookup_does_not_reorder() {
        let mut store = OrderedStore::with_capacity(2);

        store.insert_front(1, "a").unwrap();
        store.insert_front(2, "b").unwrap();
        assert!(store.lookup(&1).is_some());
        assert!(store.lookup(&9).is_none());

        assert_eq!(keys(&store), vec![2, 1]);
    }

    #[test]
    fn test_store_move_to_front() {
        let mut store = OrderedStore::with_capacity(3);

        store.insert_front(1, "a").unwrap();
        store.insert_front(2, "b").unwrap();
        store.insert_front(3, "c").unwrap();

        let id = store.lookup(&1).unwrap();
        store.move_to_front(id);
        assert_eq!(keys(&store), vec![1, 3, 2]);

        // Already at front
        store.move_to_front(id);
        assert_eq!(keys(&store), vec![1, 3, 2]);
        store.check_invariants().unwrap();
    }

    #[test]
    fn test_store_move_to_front_ignores_stale_handle() {
        let mut store = OrderedStore::with_capacity(4);

        store.insert_front(1, "a").unwrap();
        let stale = store.insert_front(2, "b").unwrap();
        store.insert_front(3, "c").unwrap();
        store.remove(stale);
        let recycled = store.insert_front(4, "d").unwrap();
        assert_eq!(recycled, stale);
        store.remove(recycled);

        store.move_to_front(stale);
        assert_eq!(keys(&store), vec![3, 1]);
        store.check_invariants().unwrap();

        let gone = store.lookup(&1).unwrap();
        store.clear();
        store.move_to_front(gone);
        store.move_to_front(EntryId(FRONT));
        store.move_to_front(EntryId(BACK));
        assert!(store.is_empty());
        store.check_invariants().unwrap();
    }

    #[test]
    fn test_store_remove() {
        let mut store = OrderedStore::with_capacity(3);

        store.insert_front(1, "a").unwrap();
        let id = store.insert_front(2, "b").unwrap();
        store.insert_front(3, "c").unwrap();

        assert_eq!(store.remove(id), Some((2, "b")));
        assert_eq!(store.remove(id), None);
        assert_eq!(keys(&store), vec![3, 1]);
        assert!(store.lookup(&2).is_none());
        store.check_invariants().unwrap();
    }

    #[test]
    fn test_store_remove_rejects_sentinels() {
        let mut store: OrderedStore<u32, &str> = OrderedStore::with_capacity(1);

        assert_eq!(store.remove(EntryId(FRONT)), None);
        assert_eq!(store.remove(EntryId(BACK)), None);
        assert_eq!(store.remove(EntryId(42)), None);
        store.check_invariants().unwrap();
    }

    #[test]
    fn test_store_back_and_nth() {
        let mut store = OrderedStore::with_capacity(3);
        assert_eq!(store.back(), None);
        assert_eq!(store.nth(0), None);

        store.insert_front(1, "a").unwrap();
        store.insert_front(2, "b").unwrap();
        store.insert_front(3, "c").unwrap();

        let back = store.back().unwrap();
        assert_eq!(store.key(back), Some(&1));

        let nth: Vec<_> = (0..3)
            .map(|i| *store.key(store.nth(i).unwrap()).unwrap())
            .collect();
        assert_eq!(nth, vec![3, 2, 1]);
        assert_eq!(store.nth(3), None);
    }

    #[test]
    fn test_store_recycles_slots() {
        let mut store = OrderedStore::with_capacity(2);

        let a = store.insert_front(1, "a").unwrap();
        store.remove(a);
        let b = store.insert_front(2, "b").unwrap();

        assert_eq!(a, b);
        assert_eq!(store.value(b), Some(&"b"));
        store.check_invariants().unwrap();
    }

    #[test]
    fn test_store_value_mut() {
        let mut store = OrderedStore::with_capacity(1);

        let id = store.insert_front(1, "a").unwrap();
        *store.value_mut(id).unwrap() = "z";

        assert_eq!(store.value(id), Some(&"z"));
    }

    #[test]
    fn test_store_clear() {
        let mut store = OrderedStore::with_capacity(3);

        store.insert_front(1, "a").unwrap();
        store.insert_front(2, "b").unwrap();
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.back(), None);
        assert_eq!(keys(&store), Vec::<u32>::new());
        store.check_invariants().unwrap();

        store.insert_front(3, "c").unwrap();
        assert_eq!(keys(&store), vec![3]);
    }

    #[test]
    fn test_store_invariant_detects_unmapped_link() {
        let mut store = OrderedStore::with_capacity(2);

        store.insert_front(1, "a").unwrap();
        store.map.clear();

        assert!(matches!(store.check_invariants(), Err(Error::Invariant(_))));
    }
}
