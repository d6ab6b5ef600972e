//! Shared first-error cell for one batch

use std::sync::OnceLock;

/// Holds the first error recorded by any task of a batch.
///
/// Recording is set-if-unset: among concurrent failures exactly one wins,
/// later ones are dropped. Tasks check [`is_set`](FirstFailure::is_set)
/// before doing I/O to stop spending network capacity on a failed batch.
#[derive(Debug)]
pub struct FirstFailure<E> {
    cell: OnceLock<E>,
}

impl<E> FirstFailure<E> {
    pub fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Record `err` unless a failure is already held.
    ///
    /// Returns `true` if `err` became the canonical failure.
    pub fn record(&self, err: E) -> bool {
        self.cell.set(err).is_ok()
    }

    pub fn is_set(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn get(&self) -> Option<&E> {
        self.cell.get()
    }

    pub fn into_inner(self) -> Option<E> {
        self.cell.into_inner()
    }
}

impl<E> Default for FirstFailure<E> {
    fn default() -> Self {
        Self::new()
    }
}
