// src/output/domain_dir.rs
//! Directory output with one file per input domain

use crate::output::{write_sorted, OutputSink};
use crate::types::DomainReport;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Writes `<domain>.txt` as soon as each domain resolves, overwriting
pub struct DomainDirectorySink {
    dir: PathBuf,
    written: usize,
}

impl DomainDirectorySink {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir, written: 0 }
    }
}

#[async_trait]
impl OutputSink for DomainDirectorySink {
    async fn record(&mut self, report: &DomainReport) -> anyhow::Result<()> {
        let path = self.dir.join(format!("{}.txt", report.domain));
        write_sorted(&path, &report.hostnames).await?;

        debug!("Wrote {} hostnames to {}", report.hostnames.len(), path.display());
        self.written += 1;
        Ok(())
    }

    async fn finish(&mut self) -> anyhow::Result<usize> {
        Ok(self.written)
    }
}
