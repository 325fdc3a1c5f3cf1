//! Read-only aggregation queries over a record store handle.

use crate::error::Result;
use crate::store::{FreqRow, RecordStore, TransitionRow};

/// Borrowing façade over the store's grouped-count queries.
///
/// Stateless and cache-free: every call reflects the store's full
/// contents at call time, so repeated calls against an unchanged store
/// return identical results.
pub struct Aggregator<'a> {
    store: &'a RecordStore,
}

impl<'a> Aggregator<'a> {
    /// Wraps a store handle for reading.
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Record width of the underlying store.
    pub fn size(&self) -> usize {
        self.store.size()
    }

    /// Value frequencies at one offset, ascending by count.
    pub fn value_counts(&self, offset: usize) -> Result<Vec<FreqRow>> {
        self.store.value_counts(offset)
    }

    /// Joint value-pair counts for an adjacent offset pair.
    pub fn transition_counts(&self, a: usize, b: usize) -> Result<Vec<TransitionRow>> {
        self.store.transition_counts(a, b)
    }
}
