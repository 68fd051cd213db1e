use std::sync::atomic::{AtomicU64, Ordering};
use serde::Serialize;

use super::process::{DropReason, Outcome};

/// A wrapper that forces the wrapped data onto its own cache line(s).
///
/// Workers sharing one engine bump these counters on every event; keeping
/// the outcome and failure groups on separate 64-byte lines stops the hot
/// `emitted` counter from contending with the failure counters.
#[repr(align(64))]
#[derive(Debug, Default)]
pub struct CacheAligned<T>(pub T);

/// Per-event outcome counters (hottest path)
#[derive(Debug, Default)]
pub struct OutcomeMetrics {
    pub processed: AtomicU64,
    pub emitted: AtomicU64,
    /// Emitted unchanged after a failed parse
    pub passed_through: AtomicU64,
}

/// Drop counters by reason
#[derive(Debug, Default)]
pub struct FailureMetrics {
    pub missing_key: AtomicU64,
    pub no_match: AtomicU64,
    pub routing: AtomicU64,
    pub invalid_time: AtomicU64,
}

/// Counters for one engine instance.
///
/// All operations use `Ordering::Relaxed`; `snapshot()` is not atomic
/// across fields, which is fine for observability.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    pub outcomes: CacheAligned<OutcomeMetrics>,
    pub failures: CacheAligned<FailureMetrics>,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record(&self, outcome: &Outcome) {
        self.outcomes.0.processed.fetch_add(1, Ordering::Relaxed);

        let counter = match outcome {
            Outcome::Emitted(_) => &self.outcomes.0.emitted,
            Outcome::Dropped(DropReason::MissingKey(_)) => &self.failures.0.missing_key,
            Outcome::Dropped(DropReason::NoMatch(_)) => &self.failures.0.no_match,
            Outcome::Dropped(DropReason::Routing(_)) => &self.failures.0.routing,
            Outcome::Dropped(DropReason::InvalidTime(_)) => &self.failures.0.invalid_time,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_pass_through(&self) {
        self.outcomes.0.passed_through.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let o = &self.outcomes.0;
        let f = &self.failures.0;
        MetricsSnapshot {
            processed: o.processed.load(Ordering::Relaxed),
            emitted: o.emitted.load(Ordering::Relaxed),
            passed_through: o.passed_through.load(Ordering::Relaxed),
            missing_key: f.missing_key.load(Ordering::Relaxed),
            no_match: f.no_match.load(Ordering::Relaxed),
            routing: f.routing.load(Ordering::Relaxed),
            invalid_time: f.invalid_time.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub processed: u64,
    pub emitted: u64,
    pub passed_through: u64,
    pub missing_key: u64,
    pub no_match: u64,
    pub routing: u64,
    pub invalid_time: u64,
}

impl MetricsSnapshot {
    /// Missing key field plus no-match: everything counted as a parse failure.
    pub fn parse_failures(&self) -> u64 {
        self.missing_key + self.no_match
    }

    pub fn dropped(&self) -> u64 {
        self.parse_failures() + self.routing + self.invalid_time
    }
}
