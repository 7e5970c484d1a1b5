// src/types.rs
use std::collections::HashSet;

/// Set of discovered hostnames, unique by exact string value
pub type ResultSet = HashSet<String>;

/// Why a source lookup produced no data
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network unreachable, DNS/TLS failure, or the body could not be read
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Anything other than HTTP 200
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    /// Body is not JSON, or not the shape the source documents
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl SourceError {
    pub const TRANSPORT: &'static str = "transport";
    pub const STATUS: &'static str = "status";
    pub const MALFORMED: &'static str = "malformed";

    /// Short tag used in logs and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            SourceError::Transport(_) => Self::TRANSPORT,
            SourceError::Status(_) => Self::STATUS,
            SourceError::Malformed(_) => Self::MALFORMED,
        }
    }
}

/// A failed lookup against one source
#[derive(Debug)]
pub struct SourceFailure {
    pub source: String,
    pub error: SourceError,
}

/// Merged result of querying every source for one domain
#[derive(Debug)]
pub struct DomainReport {
    /// The domain as it was queried
    pub domain: String,

    /// Union of all successful lookups
    pub hostnames: ResultSet,

    /// Sources that failed; their contribution is empty
    pub failures: Vec<SourceFailure>,
}

impl DomainReport {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            hostnames: ResultSet::new(),
            failures: Vec::new(),
        }
    }

    /// True when every source failed
    pub fn all_failed(&self, source_count: usize) -> bool {
        source_count > 0 && self.failures.len() == source_count
    }

    /// Drop the failure information and keep the hostnames
    pub fn into_hostnames(self) -> ResultSet {
        self.hostnames
    }
}

/// Totals for one run, single-domain or batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub domains: usize,
    pub unique_hostnames: usize,
    pub failed_lookups: usize,
    pub files_written: usize,
}

/// Sorted copy of a result set, the order every output file uses
pub fn sorted(set: &ResultSet) -> Vec<&str> {
    let mut names: Vec<&str> = set.iter().map(String::as_str).collect();
    names.sort_unstable();
    names
}
