// src/stats.rs
//! Run statistics for cert-search

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::types::{DomainReport, SourceError};

/// Thread-safe statistics collector
#[derive(Clone)]
pub struct StatsCollector {
    domains_resolved: Arc<AtomicU64>,
    hostnames_found: Arc<AtomicU64>,
    failed_lookups: Arc<AtomicU64>,
    transport_failures: Arc<AtomicU64>,
    status_failures: Arc<AtomicU64>,
    malformed_failures: Arc<AtomicU64>,
    unreachable_domains: Arc<AtomicU64>,
    start_time: Instant,
}

/// Snapshot of statistics at a point in time
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub domains_resolved: u64,
    /// Sum of per-domain counts; a hostname seen for two domains counts twice
    pub hostnames_found: u64,
    pub failed_lookups: u64,
    pub transport_failures: u64,
    pub status_failures: u64,
    pub malformed_failures: u64,
    /// Domains for which every source failed
    pub unreachable_domains: u64,
    pub domains_per_minute: f64,
    pub elapsed_secs: u64,
}

impl StatsCollector {
    /// Create a new StatsCollector
    pub fn new() -> Self {
        Self {
            domains_resolved: Arc::new(AtomicU64::new(0)),
            hostnames_found: Arc::new(AtomicU64::new(0)),
            failed_lookups: Arc::new(AtomicU64::new(0)),
            transport_failures: Arc::new(AtomicU64::new(0)),
            status_failures: Arc::new(AtomicU64::new(0)),
            malformed_failures: Arc::new(AtomicU64::new(0)),
            unreachable_domains: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    /// Account for one resolved domain
    pub fn record(&self, report: &DomainReport, source_count: usize) {
        self.domains_resolved.fetch_add(1, Ordering::Relaxed);
        self.hostnames_found
            .fetch_add(report.hostnames.len() as u64, Ordering::Relaxed);
        self.failed_lookups
            .fetch_add(report.failures.len() as u64, Ordering::Relaxed);

        for failure in &report.failures {
            let counter = match failure.error {
                SourceError::Transport(_) => &self.transport_failures,
                SourceError::Status(_) => &self.status_failures,
                SourceError::Malformed(_) => &self.malformed_failures,
            };
            counter.fetch_add(1, Ordering::Relaxed);
        }

        if report.all_failed(source_count) {
            self.unreachable_domains.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current statistics snapshot
    pub fn snapshot(&self) -> StatsSnapshot {
        let elapsed = self.start_time.elapsed();
        let resolved = self.domains_resolved.load(Ordering::Relaxed);

        let rate = if elapsed.as_secs() > 0 {
            (resolved as f64 / elapsed.as_secs() as f64) * 60.0
        } else {
            0.0
        };

        StatsSnapshot {
            domains_resolved: resolved,
            hostnames_found: self.hostnames_found.load(Ordering::Relaxed),
            failed_lookups: self.failed_lookups.load(Ordering::Relaxed),
            transport_failures: self.transport_failures.load(Ordering::Relaxed),
            status_failures: self.status_failures.load(Ordering::Relaxed),
            malformed_failures: self.malformed_failures.load(Ordering::Relaxed),
            unreachable_domains: self.unreachable_domains.load(Ordering::Relaxed),
            domains_per_minute: rate,
            elapsed_secs: elapsed.as_secs(),
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_stats(&self) -> String {
        let snapshot = self.snapshot();
        format!(
            "{} domains | {} hostnames | {} failed lookups | {:.1} domains/min | elapsed: {}",
            snapshot.domains_resolved,
            snapshot.hostnames_found,
            snapshot.failed_lookups,
            snapshot.domains_per_minute,
            Self::format_elapsed(snapshot.elapsed_secs)
        )
    }

    /// Failed lookups split by error kind, e.g. "transport 1, status 2, malformed 0"
    pub fn format_failures(&self) -> String {
        let snapshot = self.snapshot();
        [
            (SourceError::TRANSPORT, snapshot.transport_failures),
            (SourceError::STATUS, snapshot.status_failures),
            (SourceError::MALFORMED, snapshot.malformed_failures),
        ]
        .iter()
        .map(|(kind, count)| format!("{} {}", kind, count))
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Format a duration in seconds
    pub fn format_elapsed(secs: u64) -> String {
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

impl Default for StatsCollector {
    fn default() -> Self {
        Self::new()
    }
}
