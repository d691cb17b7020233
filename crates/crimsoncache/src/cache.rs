//! Cache: ordered store plus a bound eviction strategy

use std::borrow::Borrow;
use std::hash::Hash;

use tracing::{debug, info, warn};

use crate::entry::EntryId;
use crate::error::{Error, Result};
use crate::stats::CacheStats;
use crate::store::OrderedStore;
use crate::strategy::{EvictionStrategy, EvictionView};

/// Fixed-capacity key-value cache with a pluggable eviction strategy
///
/// Reads count as uses: `get` and `contains` both move the entry to the
/// front of the ordering.
pub struct Cache<K, V> {
    /// Entries and their recency ordering
    store: OrderedStore<K, V>,

    /// Victim selection policy, bound once
    strategy: Option<Box<dyn EvictionStrategy>>,

    /// Cache statistics
    stats: CacheStats,

    /// Maximum number of entries
    capacity: usize,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new cache holding at most `capacity` entries
    ///
    /// # Returns
    /// * `Err(Error::InvalidCapacity)` if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        Ok(Self {
            store: OrderedStore::with_capacity(capacity + 1),
            strategy: None,
            stats: CacheStats::new(),
            capacity,
        })
    }

    /// Create a cache and bind `strategy` in one step
    pub fn with_strategy<S>(capacity: usize, strategy: S) -> Result<Self>
    where
        S: EvictionStrategy + 'static,
    {
        let mut cache = Self::new(capacity)?;
        cache.bind_eviction_strategy(strategy)?;
        Ok(cache)
    }

    /// Attach the eviction strategy
    ///
    /// Must be called before the first `put`. A strategy cannot be swapped
    /// once bound.
    pub fn bind_eviction_strategy<S>(&mut self, strategy: S) -> Result<()>
    where
        S: EvictionStrategy + 'static,
    {
        if self.strategy.is_some() {
            return Err(Error::StrategyAlreadyBound);
        }

        info!(
            strategy = strategy.name(),
            capacity = self.capacity,
            "eviction strategy bound"
        );
        self.strategy = Some(Box::new(strategy));
        Ok(())
    }

    /// Insert or update a key
    ///
    /// An existing key gets its value replaced and becomes most recent. A new
    /// key is inserted at the front; if that takes the cache over capacity,
    /// exactly one entry chosen by the strategy is evicted.
    ///
    /// # Returns
    /// * `Err(Error::StrategyNotBound)` if no strategy is bound; nothing is stored
    pub fn put(&mut self, key: K, value: V) -> Result<()> {
        let strategy = self.strategy.as_mut().ok_or(Error::StrategyNotBound)?;

        if let Some(id) = self.store.lookup(&key) {
            if let Some(slot) = self.store.value_mut(id) {
                *slot = value;
            }
            self.store.move_to_front(id);
            self.stats.record_update();
            return Ok(());
        }

        let inserted = self.store.insert_front(key, value)?;

        if self.store.size() > self.capacity {
            let victim = strategy.select_victim(&Candidates { store: &self.store });
            if victim.and_then(|id| self.store.remove(id)).is_none() {
                let name = strategy.name();
                warn!(strategy = name, "eviction strategy did not select a victim");
                self.store.remove(inserted);
                return Err(Error::NoVictim(name));
            }

            self.stats.record_eviction();
            debug!(
                strategy = strategy.name(),
                size = self.store.size(),
                "evicted entry"
            );
        }

        self.stats.record_insert();
        Ok(())
    }

    /// Get a value, marking the entry as most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.store.lookup(key) {
            Some(id) => {
                self.store.move_to_front(id);
                self.stats.record_hit();
                self.store.value(id)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Check for a key; a hit resets its recency exactly like `get`
    pub fn contains<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Get a value without touching the ordering or the statistics
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.lookup(key).and_then(|id| self.store.value(id))
    }

    /// Remove a key from the cache
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.store.lookup(key)?;
        self.store.remove(id).map(|(_, value)| value)
    }

    /// Drop every entry and reset statistics; the strategy stays bound
    pub fn clear(&mut self) {
        self.store.clear();
        self.stats.reset();
    }

    /// Keys from most to least recently used
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.store.iter().map(|(key, _)| key)
    }

    /// Entries from most to least recently used
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.store.iter()
    }

    /// Get current number of entries
    pub fn len(&self) -> usize {
        self.store.size()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Name of the bound strategy, if any
    pub fn strategy_name(&self) -> Option<&'static str> {
        self.strategy.as_ref().map(|s| s.name())
    }

    /// Read-only access to the underlying store
    pub fn store(&self) -> &OrderedStore<K, V> {
        &self.store
    }

    /// Verify the ordering invariants and the capacity bound
    pub fn check_invariants(&self) -> Result<()> {
        self.store.check_invariants()?;
        if self.store.size() > self.capacity {
            return Err(Error::Invariant(format!(
                "{} entries exceed capacity {}",
                self.store.size(),
                self.capacity
            )));
        }
        Ok(())
    }
}

/// The store as seen by the eviction that follows an insertion
///
/// The entry just inserted at the front is not a candidate.
struct Candidates<'a, K, V> {
    store: &'a OrderedStore<K, V>,
}

impl<K, V> EvictionView for Candidates<'_, K, V>
where
    K: Hash + Eq + Clone,
{
    fn back(&self) -> Option<EntryId> {
        if self.size() == 0 {
            return None;
        }
        self.store.back()
    }

    fn nth(&self, index: usize) -> Option<EntryId> {
        self.store.nth(index + 1)
    }

    fn size(&self) -> usize {
        self.store.size().saturating_sub(1)
    }
}
