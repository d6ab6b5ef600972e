//! Single fetch task: one index, one result slot, one admission permit

use indicatif::ProgressBar;

use crate::error::BatchError;
use crate::failure::FirstFailure;
use crate::fetch::Fetch;
use crate::gate::Permit;

/// State shared by every task of one batch.
pub(crate) struct TaskShared<'a, F: Fetch> {
    pub fetcher: &'a F,
    pub failure: &'a FirstFailure<BatchError<F::Error>>,
    pub early_release: bool,
    pub progress: &'a ProgressBar,
}

/// Fetch `descriptor` and write the item into `slot`.
///
/// The permit is released at the latest when the task returns; with
/// `early_release` it is released as soon as the I/O phase finishes.
pub(crate) fn run<F: Fetch>(
    shared: &TaskShared<'_, F>,
    descriptor: &F::Descriptor,
    index: usize,
    slot: &mut Option<F::Item>,
    mut permit: Permit<'_>,
) {
    if shared.failure.is_set() {
        log::trace!("item {index}: batch already failed, skipping");
        return;
    }

    let response = match shared.fetcher.retrieve(descriptor, index) {
        Ok(r) => r,
        Err(e) => return fail(shared, index, e),
    };

    if shared.early_release {
        permit.release();
    }

    match shared.fetcher.extract(response, index) {
        Ok(item) => {
            *slot = Some(item);
            shared.progress.inc(1);
        }
        Err(e) => fail(shared, index, e),
    }
}

fn fail<F: Fetch>(shared: &TaskShared<'_, F>, index: usize, source: F::Error) {
    log::debug!("item {index}: fetch failed: {source}");
    if !shared.failure.record(BatchError::Fetch { index, source }) {
        log::trace!("item {index}: earlier failure already recorded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::AdmissionGate;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Echoes the descriptor; fails retrieval for `fail_at`, extraction for `bad_parse`.
    struct Echo {
        calls: AtomicUsize,
        fail_at: Option<usize>,
        bad_parse: Option<usize>,
    }

    impl Echo {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_at: None,
                bad_parse: None,
            }
        }
    }

    impl Fetch for Echo {
        type Descriptor = String;
        type Response = String;
        type Item = String;
        type Error = io::Error;

        fn retrieve(&self, descriptor: &String, index: usize) -> io::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_at == Some(index) {
                return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
            }
            Ok(descriptor.clone())
        }

        fn extract(&self, response: String, index: usize) -> io::Result<String> {
            if self.bad_parse == Some(index) {
                return Err(io::Error::new(io::ErrorKind::InvalidData, "bad page"));
            }
            Ok(response.to_uppercase())
        }
    }

    fn shared<'a>(
        fetcher: &'a Echo,
        failure: &'a FirstFailure<BatchError<io::Error>>,
        progress: &'a ProgressBar,
    ) -> TaskShared<'a, Echo> {
        TaskShared {
            fetcher,
            failure,
            early_release: true,
            progress,
        }
    }

    #[test]
    fn writes_slot_and_releases() {
        let echo = Echo::new();
        let failure = FirstFailure::new();
        let pb = ProgressBar::hidden();
        let gate = AdmissionGate::new(1);
        let mut slot = None;

        run(&shared(&echo, &failure, &pb), &"a".to_string(), 0, &mut slot, gate.acquire());

        assert_eq!(slot.as_deref(), Some("A"));
        assert_eq!(gate.outstanding(), 0);
        assert!(!failure.is_set());
        assert_eq!(pb.position(), 1);
    }

    #[test]
    fn skips_io_when_batch_failed() {
        let echo = Echo::new();
        let failure = FirstFailure::new();
        failure.record(BatchError::Unfilled { index: 9 });
        let pb = ProgressBar::hidden();
        let gate = AdmissionGate::new(1);
        let mut slot = None;

        run(&shared(&echo, &failure, &pb), &"a".to_string(), 0, &mut slot, gate.acquire());

        assert_eq!(echo.calls.load(Ordering::SeqCst), 0);
        assert!(slot.is_none());
        assert_eq!(gate.outstanding(), 0);
    }

    #[test]
    fn records_retrieve_failure_with_index() {
        let echo = Echo {
            fail_at: Some(4),
            ..Echo::new()
        };
        let failure = FirstFailure::new();
        let pb = ProgressBar::hidden();
        let gate = AdmissionGate::new(1);
        let mut slot = None;

        run(&shared(&echo, &failure, &pb), &"x".to_string(), 4, &mut slot, gate.acquire());

        assert!(slot.is_none());
        assert_eq!(failure.into_inner().and_then(|e| e.index()), Some(4));
        assert_eq!(gate.admitted(), 0);
    }

    #[test]
    fn records_extract_failure() {
        let echo = Echo {
            bad_parse: Some(2),
            ..Echo::new()
        };
        let failure = FirstFailure::new();
        let pb = ProgressBar::hidden();
        let gate = AdmissionGate::new(1);
        let mut slot = None;

        run(&shared(&echo, &failure, &pb), &"x".to_string(), 2, &mut slot, gate.acquire());

        let err = failure.into_inner().unwrap();
        assert_eq!(err.index(), Some(2));
        assert!(err.to_string().contains("bad page"));
    }

    #[test]
    fn later_failure_does_not_overwrite() {
        let echo = Echo {
            fail_at: Some(1),
            ..Echo::new()
        };
        let failure = FirstFailure::new();
        failure.record(BatchError::Unfilled { index: 0 });
        // Already failed: task must not even try
        let pb = ProgressBar::hidden();
        let gate = AdmissionGate::new(1);
        let mut slot = None;

        run(&shared(&echo, &failure, &pb), &"x".to_string(), 1, &mut slot, gate.acquire());

        assert_eq!(failure.into_inner().and_then(|e| e.index()), Some(0));
    }
}
