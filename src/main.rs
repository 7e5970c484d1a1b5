// src/main.rs
use cert_search::batch::{read_domains, run_batch, run_single};
use cert_search::cli::{Cli, Mode, USAGE_REMINDER};
use cert_search::config::Config;
use cert_search::output::OutputTarget;
use cert_search::progress::{LogWriter, ProgressIndicator};
use cert_search::resolver::Resolver;
use cert_search::sources;
use cert_search::stats::StatsCollector;
use cert_search::types::BatchSummary;
use clap::Parser;
use colored::Colorize;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Validate arguments
    cli.validate()?;

    // Load config file, or defaults when none is given
    let mut config = Config::load(cli.config.as_deref().map(Path::new))?;

    // Apply CLI overrides
    if cli.no_crtsh {
        config.sources.crtsh = false;
    }

    if cli.no_certspotter {
        config.sources.certspotter = false;
    }

    if let Some(concurrency) = cli.concurrency {
        config.batch.concurrency = concurrency;
    }

    if let Some(group_by) = cli.group_by {
        config.output.group_by = group_by;
    }

    // Initialize logging
    let log_level = cli.log_level().unwrap_or(config.logging.level.as_str());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    // Logs share stderr with the progress bar
    let log_writer = LogWriter::new();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(log_writer.clone())
        .init();

    let Some(mode) = cli.mode() else {
        println!("{}", USAGE_REMINDER);
        return Ok(());
    };

    if config.batch.concurrency == 0 {
        anyhow::bail!("batch.concurrency must be greater than 0");
    }

    let client = sources::build_http_client(&config.http)?;
    let resolver = Resolver::new(sources::from_config(&config.sources, client));

    if resolver.source_count() == 0 {
        anyhow::bail!("All sources are disabled; enable crt.sh or CertSpotter");
    }

    tracing::debug!("Querying sources: {}", resolver.source_names().join(", "));

    let stats = StatsCollector::new();

    let summary = match mode {
        Mode::Single(domain) => {
            if cli.output.is_some() {
                tracing::warn!("--output is ignored with --domain; writing to the current directory");
            }

            let cwd = std::env::current_dir()?;
            run_single(&resolver, &domain, &cwd, &stats).await?
        }
        Mode::Batch { input } => {
            let domains = read_domains(Path::new(&input)).await?;
            tracing::info!("Loaded {} domains from {}", domains.len(), input);

            let target = OutputTarget::for_batch(
                cli.output.as_deref(),
                &config.output.directory,
                config.output.group_by,
            );
            tracing::info!("Writing results to {:?}", target);

            let mut sink = target.into_sink().await?;

            let show_progress = !cli.no_progress && is_terminal::is_terminal(std::io::stderr());
            let progress = ProgressIndicator::new(show_progress, domains.len() as u64);
            log_writer.attach(&progress);

            let summary = run_batch(
                &resolver,
                domains,
                sink.as_mut(),
                config.batch.concurrency,
                &progress,
                &stats,
            )
            .await;

            log_writer.detach();
            progress.finish();
            summary?
        }
    };

    tracing::debug!("{}", stats.format_stats());

    if cli.stats {
        print_summary(&summary, &stats);
    }

    Ok(())
}

fn print_summary(summary: &BatchSummary, stats: &StatsCollector) {
    if !is_terminal::is_terminal(std::io::stdout()) {
        colored::control::set_override(false);
    }

    let snapshot = stats.snapshot();
    let failed = if summary.failed_lookups > 0 {
        summary.failed_lookups.to_string().red().bold()
    } else {
        summary.failed_lookups.to_string().green()
    };

    println!("\n{}", "Summary:".bold());
    println!("  Domains resolved: {}", summary.domains);
    println!("  Unique hostnames: {}", summary.unique_hostnames.to_string().cyan().bold());
    println!(
        "  Failed lookups:   {} ({})",
        failed,
        stats.format_failures().dimmed()
    );
    if snapshot.unreachable_domains > 0 {
        println!(
            "  No source answered for {} domain(s)",
            snapshot.unreachable_domains.to_string().yellow()
        );
    }
    println!("  Files written:    {}", summary.files_written);
    println!(
        "  Elapsed:          {}",
        StatsCollector::format_elapsed(snapshot.elapsed_secs).dimmed()
    );
}
