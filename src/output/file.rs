// src/output/file.rs
//! All results merged into one file

use crate::output::{write_sorted, OutputSink};
use crate::types::{DomainReport, ResultSet};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Accumulates every domain's hostnames and writes them once, sorted
pub struct CombinedFileSink {
    path: PathBuf,
    names: ResultSet,
    recorded: usize,
}

impl CombinedFileSink {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            names: ResultSet::new(),
            recorded: 0,
        }
    }
}

#[async_trait]
impl OutputSink for CombinedFileSink {
    async fn record(&mut self, report: &DomainReport) -> anyhow::Result<()> {
        self.names.extend(report.hostnames.iter().cloned());
        self.recorded += 1;
        Ok(())
    }

    async fn finish(&mut self) -> anyhow::Result<usize> {
        // Nothing was resolved (empty input), leave the file alone
        if self.recorded == 0 {
            return Ok(0);
        }

        write_sorted(&self.path, &self.names).await?;
        info!("Wrote {} hostnames to {}", self.names.len(), self.path.display());
        Ok(1)
    }
}
