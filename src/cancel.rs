//! Search cancellation
//!
//! Enumeration can run for a long time on large letter sets. A
//! [`CancellationToken`] is a cheap, cloneable flag shared between the caller
//! and the enumerator; the enumerator polls it on every recursion step.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared flag used to abandon a running search
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Wall-clock budget for one search
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    limit: Duration,
}

impl Deadline {
    pub fn new(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns true if the allowed time has fully elapsed
    #[inline]
    pub fn expired(&self) -> bool {
        self.start.elapsed() >= self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shared_between_clones() {
        let token = CancellationToken::new();
        let worker_view = token.clone();

        assert!(!worker_view.is_cancelled());
        token.cancel();
        assert!(worker_view.is_cancelled());

        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_deadline() {
        assert!(Deadline::new(Duration::ZERO).expired());
        assert!(!Deadline::new(Duration::from_secs(3600)).expired());
    }
}
