//! Extraction outcome counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Strategy family that produced a successful extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyFamily {
    Publisher,
    Generic,
    Fallback,
}

/// Counters for extraction outcomes, owned by the extractor instance.
#[derive(Debug, Default)]
pub struct ExtractionMetrics {
    attempts: AtomicU64,
    publisher_successes: AtomicU64,
    generic_successes: AtomicU64,
    fallback_successes: AtomicU64,
    failures: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub attempts: u64,
    pub publisher_successes: u64,
    pub generic_successes: u64,
    pub fallback_successes: u64,
    pub failures: u64,
}

impl ExtractionMetrics {
    pub(crate) fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_success(&self, family: StrategyFamily) {
        let counter = match family {
            StrategyFamily::Publisher => &self.publisher_successes,
            StrategyFamily::Generic => &self.generic_successes,
            StrategyFamily::Fallback => &self.fallback_successes,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            attempts: self.attempts.load(Ordering::Relaxed),
            publisher_successes: self.publisher_successes.load(Ordering::Relaxed),
            generic_successes: self.generic_successes.load(Ordering::Relaxed),
            fallback_successes: self.fallback_successes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ExtractionMetrics, StrategyFamily};

    #[test]
    fn snapshot_reflects_recorded_outcomes() {
        let metrics = ExtractionMetrics::default();
        metrics.record_attempt();
        metrics.record_attempt();
        metrics.record_success(StrategyFamily::Publisher);
        metrics.record_success(StrategyFamily::Fallback);
        metrics.record_failure();

        let snap = metrics.snapshot();
        assert_eq!(snap.attempts, 2);
        assert_eq!(snap.publisher_successes, 1);
        assert_eq!(snap.generic_successes, 0);
        assert_eq!(snap.fallback_successes, 1);
        assert_eq!(snap.failures, 1);
    }
}
