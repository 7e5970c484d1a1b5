// src/cli.rs
use clap::Parser;

use crate::output::GroupBy;

/// Printed when neither --domain nor --input is given
pub const USAGE_REMINDER: &str =
    "Please provide either a single domain with -d or an input file with -i.";

/// cert-search: subdomain discovery from Certificate Transparency logs
///
/// Queries crt.sh and CertSpotter for each domain, merges the hostnames they
/// know about and writes them, sorted, to text files.
#[derive(Parser, Debug, Clone)]
#[command(name = "cert-search")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    // ===== Input =====
    /// Domain name to fetch subdomains for
    #[arg(short = 'd', long = "domain")]
    pub domain: Option<String>,

    /// Input file containing domain names, one per line
    #[arg(short = 'i', long = "input")]
    pub input: Option<String>,

    /// Path to TOML config file
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    // ===== Output =====
    /// Output directory, or a .txt file to merge all results into
    #[arg(short = 'o', long = "output")]
    pub output: Option<String>,

    /// How a directory output is split into files
    #[arg(short = 'g', long = "group-by", value_enum)]
    pub group_by: Option<GroupBy>,

    // ===== Sources =====
    /// Do not query crt.sh
    #[arg(long = "no-crtsh")]
    pub no_crtsh: bool,

    /// Do not query CertSpotter
    #[arg(long = "no-certspotter")]
    pub no_certspotter: bool,

    // ===== Performance =====
    /// Number of domains resolved concurrently
    #[arg(short = 't', long = "concurrency")]
    pub concurrency: Option<usize>,

    // ===== Display & Statistics =====
    /// Print a summary when the run finishes
    #[arg(long = "stats")]
    pub stats: bool,

    /// Disable progress indicator
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    // ===== Logging =====
    /// Verbose logging (set log level to debug)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Quiet logging (set log level to warn)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

/// What a run does, derived from the flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Resolve one domain into `<domain>.txt`
    Single(String),
    /// Resolve every domain listed in a file
    Batch { input: String },
}

impl Cli {
    /// Validate flag combinations and return errors for invalid usage
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.domain.is_some() && self.input.is_some() {
            anyhow::bail!("Cannot specify both --domain and --input");
        }

        if self.no_crtsh && self.no_certspotter {
            anyhow::bail!(
                "Cannot use --no-crtsh with --no-certspotter: no source would be queried"
            );
        }

        if self.concurrency == Some(0) {
            anyhow::bail!("--concurrency must be greater than 0");
        }

        // Verbose and quiet are mutually exclusive
        if self.verbose && self.quiet {
            anyhow::bail!("Cannot specify both --verbose and --quiet");
        }

        Ok(())
    }

    /// Determine the run mode; `None` when neither input flag is given
    pub fn mode(&self) -> Option<Mode> {
        if let Some(ref domain) = self.domain {
            Some(Mode::Single(domain.clone()))
        } else {
            self.input.as_ref().map(|input| Mode::Batch {
                input: input.clone(),
            })
        }
    }

    /// Log level forced by flags, if any
    pub fn log_level(&self) -> Option<&str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("warn")
        } else {
            None
        }
    }
}
