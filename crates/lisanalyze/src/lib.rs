//! Laboratory information system time-series analyzer
//!
//! This crate ties the workspace together:
//! - Loading timestamp-keyed lab result files
//! - Running the analyte evaluators over each timeline
//! - Merging detected events into per-file reports
//! - Publishing reports as RSS 2.0 feeds
//!
//! # Example
//!
//! ```ignore
//! use lisanalyze::{load_file, AnalyzeConfig, Analyzer};
//!
//! let mut store = load_file("lab_data.json", false)?;
//! let mut analyzer = Analyzer::standard();
//! let report = analyzer.analyze_file("lab_data.json", &mut store, &AnalyzeConfig::default())?;
//! for (time, _analyte, event) in report.events() {
//!     println!("{event} at {time}");
//! }
//! ```

// Re-export all public APIs from internal crates
pub use lisanalyze_engine as engine;
pub use lisanalyze_feed as feed;
pub use lisanalyze_model as model;

// Convenience re-exports
pub use lisanalyze_engine::{AnalyzeConfig, Analyzer, EvalError, Registry};
pub use lisanalyze_feed::{feed_xml, FeedConfig};
pub use lisanalyze_model::{load_file, load_str, LoadError, MeasurementStore, RunReport};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
