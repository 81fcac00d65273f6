//! Drop-gate for overlapping period-change refreshes.

use std::sync::atomic::{AtomicBool, Ordering};

/// Single-flight gate: one permit at a time, no queue.
///
/// A request that cannot get the permit is dropped by the caller, not
/// parked. The permit is released when it goes out of scope, so error
/// and timeout paths release it the same way the happy path does.
pub struct RefreshGate {
    busy: AtomicBool,
}

/// Holds the gate until dropped.
pub struct RefreshPermit<'a> {
    gate: &'a RefreshGate,
}

impl RefreshGate {
    /// Create an open gate.
    pub fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Take the permit if nobody holds it; `None` means drop the request.
    pub fn try_begin(&self) -> Option<RefreshPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| RefreshPermit { gate: self })
    }

    /// Whether a permit is currently held.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Default for RefreshGate {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RefreshPermit<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}
