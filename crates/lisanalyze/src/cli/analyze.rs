//! Analyze command implementation

use super::output;
use anyhow::{Context, Result};
use colored::*;
use lisanalyze_engine::{AnalyzeConfig as EngineConfig, Analyzer};
use lisanalyze_model::load_file;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Configuration for the analyze command
pub struct AnalyzeConfig {
    pub files: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub suffix: String,
    pub compat: bool,
    pub quiet: bool,
    pub warn: bool,
    pub convert: bool,
    pub correct: bool,
}

/// Analyze lab data files
///
/// Evaluator state (PSA nadir, increase streaks) is carried across files
/// in the order given, so a patient's history split over several files
/// still trends correctly.
pub fn analyze(config: AnalyzeConfig) -> Result<()> {
    if config.files.is_empty() {
        anyhow::bail!("No data files specified");
    }

    let engine_config = EngineConfig {
        compat: config.compat,
        warn: config.warn,
        convert: config.convert,
        correct: config.correct,
        quiet: config.quiet,
    };

    let mut analyzer = Analyzer::standard();
    let mut summary_lines = Vec::new();

    for file in &config.files {
        let file_name = file.display().to_string();
        let mut store = load_file(file, config.compat)
            .with_context(|| format!("Failed to load data file: {file_name}"))?;

        let report = analyzer
            .analyze_file(&file_name, &mut store, &engine_config)
            .with_context(|| format!("Analysis failed for data file: {file_name}"))?;

        let result_path = PathBuf::from(format!("{file_name}{}", config.suffix));
        let result_file = File::create(&result_path).with_context(|| {
            format!("Failed to create result file: {}", result_path.display())
        })?;
        serde_json::to_writer_pretty(BufWriter::new(result_file), &report).with_context(|| {
            format!("Failed to write result file: {}", result_path.display())
        })?;

        if report.event_count() == 0 {
            if !config.quiet {
                println!("All is well for data file {file_name}!");
            }
            continue;
        }

        for (time, _analyte, event) in report.events() {
            let line = format!("{file_name}: {event} at {time}");
            println!("{}: {event} at {time}", file_name.cyan());
            summary_lines.push(line);
        }
    }

    if let Some(path) = &config.output {
        output::write_lines(&summary_lines, path)?;
        if !config.quiet {
            eprintln!(
                "{}",
                output::format_success(&format!("Summary written to {}", path.display()))
            );
        }
    }

    Ok(())
}
