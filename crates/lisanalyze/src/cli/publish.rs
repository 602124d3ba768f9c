//! Publish command implementation

use super::output;
use anyhow::{Context, Result};
use lisanalyze_feed::{feed_xml, FeedConfig};
use lisanalyze_model::RunReport;
use std::fs;
use std::path::PathBuf;

/// Configuration for the publish command
pub struct PublishConfig {
    pub files: Vec<PathBuf>,
    pub suffix: String,
    pub link: String,
    pub tz_offset: i64,
}

/// Turn machine-readable result files into RSS 2.0 feeds
pub fn publish(config: PublishConfig) -> Result<()> {
    if config.files.is_empty() {
        anyhow::bail!("No result files specified");
    }

    let feed_config = FeedConfig {
        link: config.link.clone(),
        tz_offset_hours: config.tz_offset,
    };

    for file in &config.files {
        let file_name = file.display().to_string();
        let text = fs::read_to_string(file)
            .with_context(|| format!("Failed to read result file: {file_name}"))?;
        let report: RunReport = serde_json::from_str(&text)
            .with_context(|| format!("Result file is not a valid report: {file_name}"))?;

        let xml = feed_xml(&report, &file_name, &feed_config)
            .with_context(|| format!("Failed to build feed for: {file_name}"))?;

        let feed_path = PathBuf::from(format!("{file_name}{}", config.suffix));
        fs::write(&feed_path, xml)
            .with_context(|| format!("Failed to write feed file: {}", feed_path.display()))?;

        println!(
            "{}",
            output::format_success(&format!("Feed written to {}", feed_path.display()))
        );
    }

    Ok(())
}
