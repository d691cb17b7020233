//! Eviction strategy abstraction
//!
//! A strategy never sees the key map or the raw links. It is lent an
//! [`EvictionView`] for the duration of one selection and answers with the
//! handle of the entry to evict.

use crate::entry::EntryId;

/// Read-only window onto the ordering a strategy selects from
pub trait EvictionView {
    /// Least recently touched candidate
    fn back(&self) -> Option<EntryId>;

    /// Candidate `index` steps from the front (0 is the most recent)
    fn nth(&self, index: usize) -> Option<EntryId>;

    /// Number of candidates
    fn size(&self) -> usize;
}

/// Policy that picks which entry to evict once capacity is exceeded
pub trait EvictionStrategy: Send {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// Select the victim among the candidates in `view`
    ///
    /// # Returns
    /// * `None` only if `view` holds no candidates
    fn select_victim(&mut self, view: &dyn EvictionView) -> Option<EntryId>;
}

impl<S: EvictionStrategy + ?Sized> EvictionStrategy for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn select_victim(&mut self, view: &dyn EvictionView) -> Option<EntryId> {
        (**self).select_victim(view)
    }
}
