//! Consecutive-failure circuit breaker for category calls.
//!
//! Once `threshold` calls in a row have failed the breaker opens and stays
//! open for the rest of the run; the remaining categories are skipped
//! instead of spending more requests against a failing API.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

#[derive(Debug)]
pub struct CircuitBreaker {
    threshold: u32,
    consecutive_failures: AtomicU32,
    tripped: AtomicBool,
}

impl CircuitBreaker {
    /// `threshold == 0` disables the breaker.
    #[must_use]
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            consecutive_failures: AtomicU32::new(0),
            tripped: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.tripped.load(Ordering::SeqCst)
    }

    pub fn record_success(&self) {
        if !self.is_open() {
            self.consecutive_failures.store(0, Ordering::SeqCst);
        }
    }

    /// Counts a failure. Returns `true` when this failure opened the breaker.
    pub fn record_failure(&self) -> bool {
        let failures = self.consecutive_failures.fetch_add(1, Ordering::SeqCst) + 1;
        if self.threshold == 0 || failures < self.threshold {
            return false;
        }
        self.tripped
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_after_threshold_consecutive_failures() {
        let breaker = CircuitBreaker::new(3);
        assert!(!breaker.record_failure());
        assert!(!breaker.record_failure());
        assert!(!breaker.is_open());
        assert!(breaker.record_failure());
        assert!(breaker.is_open());
    }

    #[test]
    fn success_resets_the_count() {
        let breaker = CircuitBreaker::new(2);
        breaker.record_failure();
        breaker.record_success();
        assert_eq!(breaker.consecutive_failures(), 0);
        assert!(!breaker.record_failure());
        assert!(!breaker.is_open());
    }

    #[test]
    fn stays_open_once_tripped() {
        let breaker = CircuitBreaker::new(1);
        assert!(breaker.record_failure());
        breaker.record_success();
        assert!(breaker.is_open());
        // Only the first failure past the threshold reports the trip.
        assert!(!breaker.record_failure());
    }

    #[test]
    fn zero_threshold_never_opens() {
        let breaker = CircuitBreaker::new(0);
        for _ in 0..10 {
            assert!(!breaker.record_failure());
        }
        assert!(!breaker.is_open());
    }
}
