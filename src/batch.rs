// src/batch.rs
//! Single-domain and batch runs: resolve, then hand results to a sink

use anyhow::{Context, Result};
use futures_util::stream::{self, StreamExt};
use std::path::Path;
use tracing::{debug, info};

use crate::output::{CombinedFileSink, OutputSink};
use crate::progress::ProgressIndicator;
use crate::resolver::Resolver;
use crate::stats::StatsCollector;
use crate::types::{BatchSummary, ResultSet};

/// Read domains from a file, one per line, surrounding whitespace trimmed
///
/// Blank lines are kept and queried as the empty domain.
pub async fn read_domains(path: &Path) -> Result<Vec<String>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read input file {}", path.display()))?;

    Ok(contents.lines().map(|line| line.trim().to_string()).collect())
}

/// Resolve one domain and write `<domain>.txt` into `dir`, overwriting it
pub async fn run_single(
    resolver: &Resolver,
    domain: &str,
    dir: &Path,
    stats: &StatsCollector,
) -> Result<BatchSummary> {
    let report = resolver.resolve(domain).await;
    stats.record(&report, resolver.source_count());

    let mut sink = CombinedFileSink::new(dir.join(format!("{}.txt", domain)));
    sink.record(&report).await?;
    let files_written = sink.finish().await?;

    Ok(BatchSummary {
        domains: 1,
        unique_hostnames: report.hostnames.len(),
        failed_lookups: report.failures.len(),
        files_written,
    })
}

/// Resolve every domain with at most `concurrency` in flight
///
/// Reports are consumed here, on one task, so the sink never sees two
/// writes at once. Completion order is not input order.
pub async fn run_batch(
    resolver: &Resolver,
    domains: Vec<String>,
    sink: &mut dyn OutputSink,
    concurrency: usize,
    progress: &ProgressIndicator,
    stats: &StatsCollector,
) -> Result<BatchSummary> {
    let total = domains.len();
    let concurrency = concurrency.max(1);
    debug!("Resolving {} domains, {} at a time", total, concurrency);

    let mut reports = stream::iter(domains)
        .map(|domain| async move { resolver.resolve(&domain).await })
        .buffer_unordered(concurrency);

    let mut all = ResultSet::new();
    let mut summary = BatchSummary::default();

    while let Some(report) = reports.next().await {
        summary.domains += 1;
        summary.failed_lookups += report.failures.len();

        stats.record(&report, resolver.source_count());
        progress.inc();
        progress.set_message(format!(
            "Resolved {} ({}/{})",
            report.domain, summary.domains, total
        ));

        sink.record(&report).await?;
        all.extend(report.into_hostnames());
    }

    summary.files_written = sink.finish().await?;
    summary.unique_hostnames = all.len();

    info!("Found {} unique subdomains", summary.unique_hostnames);
    Ok(summary)
}
