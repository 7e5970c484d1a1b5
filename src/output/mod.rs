// src/output/mod.rs
//! Output routing for discovered hostnames
//!
//! Every policy is an [`OutputSink`]: the batch layer hands it one
//! [`DomainReport`] at a time from a single task, then calls `finish`.

use crate::types::{sorted, DomainReport, ResultSet};
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub mod domain_dir;
pub mod file;
pub mod label_dir;

pub use domain_dir::DomainDirectorySink;
pub use file::CombinedFileSink;
pub use label_dir::LabelDirectorySink;

/// How hostnames are split into files when the target is a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GroupBy {
    /// One `<label>.txt` per leading label of each hostname (appended)
    Label,
    /// One `<domain>.txt` per input domain (overwritten)
    #[default]
    InputDomain,
}

/// Receives resolved domains and writes them out
#[async_trait]
pub trait OutputSink: Send {
    /// Take the results of one domain
    async fn record(&mut self, report: &DomainReport) -> anyhow::Result<()>;

    /// Write anything still buffered; returns the number of files written
    async fn finish(&mut self) -> anyhow::Result<usize>;
}

/// Where batch results go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Union of every domain in one file
    File(PathBuf),
    /// A directory of per-group files
    Directory { path: PathBuf, group_by: GroupBy },
}

impl OutputTarget {
    /// Pick the target for a batch run from the `-o` value
    ///
    /// A path with a `.txt` extension is a single file; anything else, or no
    /// value at all, is a directory.
    pub fn for_batch(output: Option<&str>, default_dir: &str, group_by: GroupBy) -> Self {
        match output {
            Some(path) if is_text_file(Path::new(path)) => OutputTarget::File(PathBuf::from(path)),
            Some(path) => OutputTarget::Directory {
                path: PathBuf::from(path),
                group_by,
            },
            None => OutputTarget::Directory {
                path: PathBuf::from(default_dir),
                group_by,
            },
        }
    }

    /// Build the sink, creating the directory if needed
    pub async fn into_sink(self) -> anyhow::Result<Box<dyn OutputSink>> {
        match self {
            OutputTarget::File(path) => Ok(Box::new(CombinedFileSink::new(path))),
            OutputTarget::Directory { path, group_by } => {
                tokio::fs::create_dir_all(&path)
                    .await
                    .with_context(|| format!("Failed to create output directory {}", path.display()))?;

                Ok(match group_by {
                    GroupBy::Label => Box::new(LabelDirectorySink::new(path)),
                    GroupBy::InputDomain => Box::new(DomainDirectorySink::new(path)),
                })
            }
        }
    }
}

/// True when the path names a text file rather than a directory
pub fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}

/// Text before the first `.`; the whole name if it has none
pub fn leading_label(hostname: &str) -> &str {
    hostname
        .split_once('.')
        .map(|(label, _)| label)
        .unwrap_or(hostname)
}

/// One hostname per line, sorted, newline-terminated
pub fn render(names: &ResultSet) -> String {
    render_lines(sorted(names))
}

pub(crate) fn render_lines<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    // Empty names would show up as blank lines
    for name in names.into_iter().filter(|n| !n.is_empty()) {
        out.push_str(name);
        out.push('\n');
    }
    out
}

/// Overwrite `path` with the sorted set
pub async fn write_sorted(path: &Path, names: &ResultSet) -> anyhow::Result<()> {
    tokio::fs::write(path, render(names))
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
