//! Output formatting utilities

use anyhow::{Context, Result};
use colored::*;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Set up color output based on user preference
pub fn setup_colors(mode: &str) {
    match mode.to_lowercase().as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => {
            // Auto-detect based on terminal
            if std::env::var("TERM").is_ok() {
                colored::control::set_override(true);
            } else {
                colored::control::set_override(false);
            }
        }
    }
}

/// Format an error for display
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {:#}", "Error:".red().bold(), error)
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {}", "Success:".green().bold(), message)
}

/// Append a block of summary lines to a file, one per line; the file is
/// created if missing and earlier runs' lines are kept
pub fn write_lines(lines: &[String], path: &Path) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    for line in lines {
        writeln!(file, "{line}")
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
    }
    Ok(())
}

/// Stderr logger for warnings emitted by the evaluators (unit mismatches,
/// missing reference ranges)
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            log::Level::Error => "error".red().bold(),
            log::Level::Warn => "warning".yellow().bold(),
            other => other.to_string().to_lowercase().as_str().normal(),
        };
        eprintln!("{}: {}", level, record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Install the stderr logger. Safe to call more than once.
pub fn init_logger(verbose: bool) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    });
}
