// src/progress.rs
//! Progress indicator using indicatif

use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

/// Progress indicator wrapper
#[derive(Clone)]
pub struct ProgressIndicator {
    bar: Option<ProgressBar>,
}

impl ProgressIndicator {
    /// Create a progress indicator counting up to `total` domains
    pub fn new(enabled: bool, total: u64) -> Self {
        if !enabled {
            return Self::disabled();
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{pos}/{len}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar: Some(bar) }
    }

    /// An indicator that draws nothing
    pub fn disabled() -> Self {
        Self { bar: None }
    }

    /// Set the status message
    pub fn set_message(&self, msg: impl Into<String>) {
        if let Some(ref bar) = self.bar {
            bar.set_message(msg.into());
        }
    }

    /// Count one finished domain
    pub fn inc(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Temporarily hide the bar to print other output
    pub fn suspend<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if let Some(ref bar) = self.bar {
            bar.suspend(f)
        } else {
            f()
        }
    }

    /// Finish and clear the progress indicator
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }

    /// Check if progress indicator is drawing
    pub fn is_enabled(&self) -> bool {
        self.bar.is_some()
    }
}

/// Stderr log writer that hides the progress bar while a line is written
///
/// Installed with `tracing_subscriber::fmt().with_writer(..)` before any bar
/// exists; `attach` routes later events through the bar's `suspend`.
#[derive(Clone, Default)]
pub struct LogWriter {
    progress: Arc<Mutex<Option<ProgressIndicator>>>,
}

impl LogWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start suspending `progress` around every log line
    pub fn attach(&self, progress: &ProgressIndicator) {
        if !progress.is_enabled() {
            return;
        }
        if let Ok(mut slot) = self.progress.lock() {
            *slot = Some(progress.clone());
        }
    }

    /// Go back to plain stderr writes
    pub fn detach(&self) {
        if let Ok(mut slot) = self.progress.lock() {
            *slot = None;
        }
    }

    /// True while a progress bar is attached
    pub fn is_attached(&self) -> bool {
        self.progress
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }
}

/// One event's worth of output from [`LogWriter`]
pub struct LogLine {
    progress: Option<ProgressIndicator>,
}

impl Write for LogLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.progress {
            Some(ref progress) => progress.suspend(|| io::stderr().write_all(buf))?,
            None => io::stderr().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for LogWriter {
    type Writer = LogLine;

    fn make_writer(&'a self) -> Self::Writer {
        let progress = self.progress.lock().ok().and_then(|slot| slot.clone());
        LogLine { progress }
    }
}
