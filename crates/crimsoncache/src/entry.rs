//! Arena entries and the splice operations on them
//!
//! Links are indices into the arena rather than pointers. The two boundary
//! sentinels live at fixed indices and carry no data.

/// Arena index of the front (most recent) sentinel
pub(crate) const FRONT: usize = 0;

/// Arena index of the back (least recent) sentinel
pub(crate) const BACK: usize = 1;

/// Handle to a live entry in an [`OrderedStore`](crate::OrderedStore).
///
/// Only valid until the next mutation of the store that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(pub(crate) usize);

/// Node in the ordering sequence
pub(crate) struct Entry<K, V> {
    /// `None` for sentinels and recycled slots
    pub(crate) data: Option<(K, V)>,
    pub(crate) prev: usize,
    pub(crate) next: usize,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn sentinel(prev: usize, next: usize) -> Self {
        Self {
            data: None,
            prev,
            next,
        }
    }

    pub(crate) fn occupied(key: K, value: V) -> Self {
        Self {
            data: Some((key, value)),
            prev: FRONT,
            next: BACK,
        }
    }

    pub(crate) fn is_live(&self) -> bool {
        self.data.is_some()
    }
}

/// Splice `idx` out of the sequence, patching its neighbours.
pub(crate) fn detach<K, V>(nodes: &mut [Entry<K, V>], idx: usize) {
    let (prev, next) = (nodes[idx].prev, nodes[idx].next);
    nodes[prev].next = next;
    nodes[next].prev = prev;
}

/// Link `idx` immediately after `anchor`.
pub(crate) fn attach_after<K, V>(nodes: &mut [Entry<K, V>], anchor: usize, idx: usize) {
    let next = nodes[anchor].next;
    nodes[idx].prev = anchor;
    nodes[idx].next = next;
    nodes[next].prev = idx;
    nodes[anchor].next = idx;
}
