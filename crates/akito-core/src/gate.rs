//! Bounded admission gate for fan-out fetch tasks.
//!
//! A counting semaphore (`Mutex + Condvar`) that additionally tracks every
//! permit it has handed out, so the issuer can wait for all tasks to finish.
//! Releasing a permit frees its admission slot; dropping it marks the task done.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Default number of concurrently admitted tasks.
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Default)]
struct GateState {
    /// Permits currently counted against the capacity
    admitted: usize,
    /// Permits issued and not yet dropped
    outstanding: usize,
}

/// Counting semaphore with a completion barrier.
#[derive(Debug)]
pub struct AdmissionGate {
    capacity: usize,
    state: Mutex<GateState>,
    cond: Condvar,
}

/// One admitted task. Releases its slot on [`release`](Permit::release) or drop,
/// and counts as finished once dropped.
#[derive(Debug)]
pub struct Permit<'a> {
    gate: &'a AdmissionGate,
    released: bool,
}

impl AdmissionGate {
    /// Create a gate admitting at most `capacity` tasks at once (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(GateState::default()),
            cond: Condvar::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Block until a slot is free, then admit the caller.
    pub fn acquire(&self) -> Permit<'_> {
        let mut state = self.lock();
        while state.admitted >= self.capacity {
            state = self.cond.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
        state.admitted += 1;
        state.outstanding += 1;
        Permit {
            gate: self,
            released: false,
        }
    }

    /// Block until every issued permit has been dropped.
    pub fn await_all(&self) {
        let mut state = self.lock();
        while state.outstanding > 0 {
            state = self.cond.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Permits currently counted against the capacity.
    pub fn admitted(&self) -> usize {
        self.lock().admitted
    }

    /// Permits issued and not yet dropped (admitted or released early).
    pub fn outstanding(&self) -> usize {
        self.lock().outstanding
    }

    // Counters are never left half-updated, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for AdmissionGate {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Permit<'_> {
    /// Return the admission slot while the task keeps running. Idempotent.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        let mut state = self.gate.lock();
        state.admitted -= 1;
        // notify_all: both acquirers and await_all may be waiting on the same condvar
        self.gate.cond.notify_all();
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        self.release();
        let mut state = self.gate.lock();
        state.outstanding -= 1;
        self.gate.cond.notify_all();
    }
}
