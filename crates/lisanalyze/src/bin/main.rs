//! lisanalyze command-line interface

use clap::{Parser, Subcommand};
use lisanalyze::cli::{analyze, output, publish};
use std::path::PathBuf;

/// Laboratory data analysis tool
#[derive(Parser)]
#[command(name = "lisanalyze")]
#[command(author, version, about = "Simple analyzer for LIS data", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze JSON-formatted lab data files
    Analyze {
        /// Data files to analyze
        files: Vec<PathBuf>,

        /// Append human-readable event lines to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suffix appended to each input file name for the result document
        #[arg(long, default_value = "_result.json")]
        suffix: String,

        /// Disable the ISO 8601 timestamp key check
        #[arg(short, long)]
        compat: bool,

        /// Suppress verbose messages
        #[arg(short, long)]
        quiet: bool,

        /// Enable extra warnings (unit mismatches)
        #[arg(short, long)]
        warn: bool,

        /// Convert values to each analyte's built-in unit before evaluation
        #[arg(long)]
        convert: bool,

        /// Disable cross-analyte corrections (glucose-corrected sodium,
        /// albumin-corrected calcium)
        #[arg(long)]
        no_correct: bool,
    },

    /// Publish result documents as RSS 2.0 feeds
    Publish {
        /// Result files to publish
        files: Vec<PathBuf>,

        /// Suffix appended to each result file name for the feed document
        #[arg(long, default_value = ".xml")]
        suffix: String,

        /// Channel and item link URL
        #[arg(long, default_value = "https://example.invalid/lisanalyze")]
        link: String,

        /// UTC offset (hours) of the source timestamps
        #[arg(long, default_value_t = 8)]
        tz_offset: i64,
    },
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(&cli.color);
    output::init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            files,
            output,
            suffix,
            compat,
            quiet,
            warn,
            convert,
            no_correct,
        } => {
            let config = analyze::AnalyzeConfig {
                files,
                output,
                suffix,
                compat,
                quiet,
                warn,
                convert,
                correct: !no_correct,
            };
            analyze::analyze(config)
        }

        Commands::Publish {
            files,
            suffix,
            link,
            tz_offset,
        } => {
            let config = publish::PublishConfig {
                files,
                suffix,
                link,
                tz_offset,
            };
            publish::publish(config)
        }
    };

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
