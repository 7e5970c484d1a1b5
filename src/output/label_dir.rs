// src/output/label_dir.rs
//! Directory output grouped by each hostname's leading label

use crate::output::{leading_label, render_lines, OutputSink};
use crate::types::{sorted, DomainReport, ResultSet};
use anyhow::Context;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Appends each hostname to `<label>.txt`, where label is the text before
/// its first dot. `mail.example.com` and `mail.example.org` share `mail.txt`.
///
/// Files are opened in append mode, so earlier runs are kept.
pub struct LabelDirectorySink {
    dir: PathBuf,
    names: ResultSet,
}

impl LabelDirectorySink {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            names: ResultSet::new(),
        }
    }
}

/// A label may only name a file directly inside the output directory
fn is_plain_label(label: &str) -> bool {
    !label.contains(['/', '\\', '\0'])
}

#[async_trait]
impl OutputSink for LabelDirectorySink {
    async fn record(&mut self, report: &DomainReport) -> anyhow::Result<()> {
        self.names.extend(report.hostnames.iter().cloned());
        Ok(())
    }

    async fn finish(&mut self) -> anyhow::Result<usize> {
        let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for name in sorted(&self.names) {
            if name.is_empty() {
                continue;
            }
            let label = leading_label(name);
            if !is_plain_label(label) {
                warn!("Skipping {}: label {:?} is not a plain file name", name, label);
                continue;
            }
            groups.entry(label).or_default().push(name);
        }

        for (label, names) in &groups {
            let path = self.dir.join(format!("{}.txt", label));
            debug!("Appending {} hostnames to {}", names.len(), path.display());

            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;

            file.write_all(render_lines(names.iter().copied()).as_bytes())
                .await
                .with_context(|| format!("Failed to append to {}", path.display()))?;
            file.flush().await?;
        }

        info!(
            "Grouped {} hostnames into {} files under {}",
            self.names.len(),
            groups.len(),
            self.dir.display()
        );

        Ok(groups.len())
    }
}
