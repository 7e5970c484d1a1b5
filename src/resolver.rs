// src/resolver.rs
//! Per-domain fan-out across every configured source

use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

use crate::sources::CertSource;
use crate::types::{DomainReport, SourceFailure};

/// Queries all sources for a domain and merges their answers
#[derive(Clone)]
pub struct Resolver {
    sources: Vec<Arc<dyn CertSource>>,
}

impl Resolver {
    pub fn new(sources: Vec<Arc<dyn CertSource>>) -> Self {
        Self { sources }
    }

    /// Number of sources queried per domain
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Names of the configured sources, in query order
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Fetch from every source concurrently and union the results
    ///
    /// A failing source is logged and recorded in the report; it never
    /// discards what the other sources returned.
    pub async fn resolve(&self, domain: &str) -> DomainReport {
        let lookups = self.sources.iter().map(|source| async move {
            (source.name().to_string(), source.fetch(domain).await)
        });

        let outcomes = join_all(lookups).await;

        let mut report = DomainReport::new(domain);

        for (source, outcome) in outcomes {
            match outcome {
                Ok(names) => report.hostnames.extend(names),
                Err(error) => {
                    warn!(
                        "Error fetching from {} for {} ({}): {}",
                        source,
                        domain,
                        error.kind(),
                        error
                    );
                    report.failures.push(SourceFailure { source, error });
                }
            }
        }

        info!(
            "Found {} unique subdomains for {}",
            report.hostnames.len(),
            domain
        );

        report
    }
}
