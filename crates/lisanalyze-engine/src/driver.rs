//! The run driver

use crate::config::AnalyzeConfig;
use crate::error::EvalResult;
use crate::evaluator::AnalyteEvaluator;
use crate::merge::{merge, MergedEvents};
use crate::registry::Registry;
use chrono::Local;
use lisanalyze_model::{MeasurementStore, RunReport};

/// Drives one analysis run: owns the registry and one evaluator (state
/// included) per registered profile.
///
/// Constructing a new `Analyzer` is the state reset: evaluator state and
/// event logs live exactly as long as this value. Within one run, state
/// deliberately carries across files - a run models a single patient's
/// multi-file history - so two unrelated patients need two analyzers.
#[derive(Debug)]
pub struct Analyzer {
    registry: Registry,
    evaluators: Vec<AnalyteEvaluator>,
}

impl Analyzer {
    /// An analyzer over an explicit registry.
    pub fn new(registry: Registry) -> Self {
        let evaluators = registry
            .profiles()
            .iter()
            .copied()
            .map(AnalyteEvaluator::new)
            .collect();
        Self {
            registry,
            evaluators,
        }
    }

    /// An analyzer over the standard registry.
    pub fn standard() -> Self {
        Self::new(Registry::standard())
    }

    /// The registry this run uses.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The evaluators, in registry order (tests and diagnostics).
    pub fn evaluators(&self) -> &[AnalyteEvaluator] {
        &self.evaluators
    }

    /// Analyze one validated file: iterate its timestamps in
    /// chronological order, invoking every evaluator at every timestamp
    /// in registry order, then merge and return this file's report.
    ///
    /// The store must already have passed load-time validation; an
    /// evaluator failure (unit conversion, unparseable value) aborts the
    /// file's analysis and propagates.
    pub fn analyze_file(
        &mut self,
        file_name: &str,
        store: &mut MeasurementStore,
        cfg: &AnalyzeConfig,
    ) -> EvalResult<RunReport> {
        let xref = self.registry.cross_ref();
        for time in store.sorted_times() {
            for evaluator in &mut self.evaluators {
                evaluator.evaluate(file_name, store, &time, cfg, &xref)?;
            }
        }
        Ok(self.report_for(file_name))
    }

    /// The combined event document across every file processed so far.
    pub fn merged(&self) -> MergedEvents {
        merge(&self.evaluators)
    }

    /// Build the output document for one file from the merged timeline,
    /// stamped with the current wall-clock time.
    pub fn report_for(&self, file_name: &str) -> RunReport {
        let mut merged = self.merged();
        let mut report = RunReport::new(file_name, Local::now().to_rfc3339());
        if let Some(timeline) = merged.swap_remove(file_name) {
            report.timeline = timeline;
        }
        report
    }
}
