//! Request generations for discarding stale async results.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one started request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic request counter owned by a component.
///
/// Every request takes a [`Ticket`]; its result may only be applied while the
/// ticket is still the latest. Starting a newer request or unmounting the
/// component makes older tickets stale.
#[derive(Debug, Default)]
pub struct Generation {
    current: AtomicU64,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }

    /// Makes every outstanding ticket stale.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

/// What happened to the result of an async fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result (success or failure) replaced the held state.
    Applied,
    /// A newer request or an unmount made the result stale.
    Discarded,
    /// No request was issued.
    Skipped,
}
