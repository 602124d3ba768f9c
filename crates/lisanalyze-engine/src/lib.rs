//! Analyte evaluation and event-detection engine
//!
//! The engine walks one patient file's [`MeasurementStore`] in
//! chronological order and runs every registered analyte evaluator at
//! every timestamp. Each evaluator normalizes its analyte's reading,
//! applies range, panic, cross-analyte ratio and trend rules, and records
//! events into its private event dictionary. A final merge step folds all
//! evaluators' findings into one per-file, time-ordered [`RunReport`].
//!
//! Evaluator state (nadir, consecutive-increase counter) is owned by the
//! [`Analyzer`] and lives for exactly one run. It deliberately carries
//! across files *within* a run - a run models one patient's multi-file
//! history - but two runs never share state.
//!
//! [`MeasurementStore`]: lisanalyze_model::MeasurementStore
//! [`RunReport`]: lisanalyze_model::RunReport

pub mod analytes;
pub mod config;
pub mod convert;
pub mod driver;
pub mod error;
pub mod events;
pub mod evaluator;
pub mod merge;
pub mod profile;
pub mod registry;
pub mod xref;

pub use config::AnalyzeConfig;
pub use driver::Analyzer;
pub use error::{EvalError, EvalResult};
pub use evaluator::AnalyteEvaluator;
pub use events::{EventDict, EventLog};
pub use merge::{merge, MergedEvents};
pub use profile::AnalyteProfile;
pub use registry::Registry;
pub use xref::CrossRef;
