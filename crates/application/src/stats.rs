use dashmap::DashMap;
use ferrous_dnswire_domain::PacketError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Running counters for packet inspection, shared across tasks.
#[derive(Default)]
pub struct InspectionStats {
    pub inspected: AtomicU64,
    pub decoded: AtomicU64,
    pub queries: AtomicU64,
    pub responses: AtomicU64,
    pub redirected: AtomicU64,
    pub reserved_answers: AtomicU64,
    pub rewrite_failures: AtomicU64,
    pub sink_failures: AtomicU64,
    rejections: DashMap<&'static str, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub inspected: u64,
    pub decoded: u64,
    pub rejected: u64,
    pub queries: u64,
    pub responses: u64,
    pub redirected: u64,
    pub reserved_answers: u64,
    pub rewrite_failures: u64,
    pub sink_failures: u64,
    /// Rejections keyed by [`PacketError::kind`].
    pub rejections: BTreeMap<&'static str, u64>,
}

impl InspectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_rejection(&self, error: &PacketError) {
        *self.rejections.entry(error.kind()).or_insert(0) += 1;
    }

    pub fn rejected(&self) -> u64 {
        self.rejections.iter().map(|entry| *entry.value()).sum()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let rejections: BTreeMap<&'static str, u64> = self
            .rejections
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect();

        StatsSnapshot {
            inspected: self.inspected.load(AtomicOrdering::Relaxed),
            decoded: self.decoded.load(AtomicOrdering::Relaxed),
            rejected: rejections.values().sum(),
            queries: self.queries.load(AtomicOrdering::Relaxed),
            responses: self.responses.load(AtomicOrdering::Relaxed),
            redirected: self.redirected.load(AtomicOrdering::Relaxed),
            reserved_answers: self.reserved_answers.load(AtomicOrdering::Relaxed),
            rewrite_failures: self.rewrite_failures.load(AtomicOrdering::Relaxed),
            sink_failures: self.sink_failures.load(AtomicOrdering::Relaxed),
            rejections,
        }
    }
}

pub(crate) fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, AtomicOrdering::Relaxed);
}
