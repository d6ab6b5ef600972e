//! Batch orchestration: validated range → one task per index → all-or-nothing result

use std::time::Instant;

use indicatif::ProgressBar;

use crate::error::BatchError;
use crate::failure::FirstFailure;
use crate::fetch::Fetch;
use crate::gate::{AdmissionGate, DEFAULT_CAPACITY};
use crate::range::FetchRange;
use crate::task::{self, TaskShared};

/// Batch fetch settings.
#[derive(Clone)]
pub struct Batch {
    capacity: usize,
    early_release: bool,
    progress: ProgressBar,
}

impl std::fmt::Debug for Batch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Batch")
            .field("capacity", &self.capacity)
            .field("early_release", &self.early_release)
            .finish_non_exhaustive()
    }
}

impl Batch {
    /// Batch admitting at most `capacity` concurrent fetches (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            early_release: true,
            progress: ProgressBar::hidden(),
        }
    }

    /// Release the admission slot once I/O completes rather than when the task ends.
    pub fn early_release(mut self, enabled: bool) -> Self {
        self.early_release = enabled;
        self
    }

    /// Progress bar advanced once per completed item.
    pub fn progress(mut self, pb: ProgressBar) -> Self {
        self.progress = pb;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Fetch items `start..=end` (zero-based, inclusive).
    ///
    /// Returns all `end - start + 1` items in index order, or the first failure.
    /// Never returns partial results.
    pub fn fetch_range<F: Fetch>(
        &self,
        fetcher: &F,
        items: &[F::Descriptor],
        start: usize,
        end: usize,
    ) -> Result<Vec<F::Item>, BatchError<F::Error>> {
        let range = FetchRange::validate(items.len(), start, end)?;
        self.run(fetcher, items, range)
    }

    /// Fetch every item. An empty collection yields an empty result without
    /// touching the validator or the fetcher.
    pub fn fetch_all<F: Fetch>(
        &self,
        fetcher: &F,
        items: &[F::Descriptor],
    ) -> Result<Vec<F::Item>, BatchError<F::Error>> {
        match FetchRange::full(items.len()) {
            Some(range) => self.run(fetcher, items, range),
            None => Ok(Vec::new()),
        }
    }

    fn run<F: Fetch>(
        &self,
        fetcher: &F,
        items: &[F::Descriptor],
        range: FetchRange,
    ) -> Result<Vec<F::Item>, BatchError<F::Error>> {
        let started = Instant::now();
        log::debug!(
            "Fetching items {}..={} with {} slots",
            range.start(),
            range.end(),
            self.capacity
        );

        let mut slots: Vec<Option<F::Item>> = Vec::with_capacity(range.len());
        slots.resize_with(range.len(), || None);

        let gate = AdmissionGate::new(self.capacity);
        let failure = FirstFailure::new();
        let shared = TaskShared {
            fetcher,
            failure: &failure,
            early_release: self.early_release,
            progress: &self.progress,
        };
        let descriptors = &items[range.start()..=range.end()];

        std::thread::scope(|s| {
            // Each task receives the one `&mut` slot at its own offset
            for (offset, (slot, descriptor)) in slots.iter_mut().zip(descriptors).enumerate() {
                let index = range.index_at(offset);
                let permit = gate.acquire();
                let shared = &shared;
                s.spawn(move || task::run(shared, descriptor, index, slot, permit));
            }
            gate.await_all();
        });

        if let Some(err) = failure.into_inner() {
            log::warn!("Batch {}..={} failed: {err}", range.start(), range.end());
            return Err(err);
        }

        let mut results = Vec::with_capacity(slots.len());
        for (offset, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(item) => results.push(item),
                None => {
                    return Err(BatchError::Unfilled {
                        index: range.index_at(offset),
                    })
                }
            }
        }

        log::info!(
            "Fetched {} items in {:.1}s",
            results.len(),
            started.elapsed().as_secs_f64()
        );
        Ok(results)
    }
}

impl Default for Batch {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// [`Batch::fetch_range`] with default settings.
pub fn fetch_range<F: Fetch>(
    fetcher: &F,
    items: &[F::Descriptor],
    start: usize,
    end: usize,
) -> Result<Vec<F::Item>, BatchError<F::Error>> {
    Batch::default().fetch_range(fetcher, items, start, end)
}

/// [`Batch::fetch_all`] with default settings.
pub fn fetch_all<F: Fetch>(
    fetcher: &F,
    items: &[F::Descriptor],
) -> Result<Vec<F::Item>, BatchError<F::Error>> {
    Batch::default().fetch_all(fetcher, items)
}
