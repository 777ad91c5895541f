//! Monotonic request tokens for discarding stale responses.
//!
//! There is no cancellation for an in-flight completion: a caller that
//! loses interest cannot retract the request. Each engine call therefore
//! takes a token before suspending at the gateway and re-checks it after
//! resuming; a response whose token is no longer current is discarded
//! without mutating history or session state.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter handing out request tokens.
#[derive(Debug, Default)]
pub struct RequestCounter {
    current: AtomicU64,
}

impl RequestCounter {
    /// Start a new request, superseding any in flight.
    pub fn begin(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether the given token still identifies the latest request.
    pub fn is_current(&self, token: u64) -> bool {
        self.current.load(Ordering::SeqCst) == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_monotonic() {
        let counter = RequestCounter::default();
        let first = counter.begin();
        let second = counter.begin();
        assert!(second > first);
    }

    #[test]
    fn test_newer_request_supersedes_older() {
        let counter = RequestCounter::default();
        let first = counter.begin();
        assert!(counter.is_current(first));

        let second = counter.begin();
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
    }
}
