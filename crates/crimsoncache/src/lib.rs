//! # crimsoncache
//!
//! Fixed-capacity key-value cache with a pluggable eviction strategy.
//!
//! ## Architecture
//! - **OrderedStore**: AHash key map plus an arena-backed doubly-linked list
//!   with two sentinel slots. Lookup, move-to-front and removal are O(1).
//! - **EvictionStrategy**: picks the victim through a narrow [`EvictionView`]
//!   (`back`, `nth`, `size`) instead of the whole store.
//! - **Cache**: enforces capacity, treats every read as a use, and evicts
//!   exactly one entry per over-capacity insertion.
//!
//! ## Example
//! ```
//! use crimsoncache::{Cache, RecencyStrategy};
//!
//! let mut cache = Cache::new(2)?;
//! cache.bind_eviction_strategy(RecencyStrategy::new())?;
//!
//! cache.put("a", 1)?;
//! cache.put("b", 2)?;
//! cache.get("a");
//! cache.put("c", 3)?;
//!
//! assert!(cache.contains("a"));
//! assert!(!cache.contains("b"));
//! # Ok::<(), crimsoncache::Error>(())
//! ```

#![warn(missing_docs)]

mod cache;
mod entry;
mod error;
mod random;
mod recency;
mod stats;
mod store;
mod strategy;

pub use cache::Cache;
pub use entry::EntryId;
pub use error::{Error, Result};
pub use random::RandomStrategy;
pub use recency::RecencyStrategy;
pub use stats::CacheStats;
pub use store::{Iter, OrderedStore};
pub use strategy::{EvictionStrategy, EvictionView};
