//! The timeline merge step

use crate::evaluator::AnalyteEvaluator;
use indexmap::IndexMap;
use lisanalyze_model::report::TimelineSlice;

/// All evaluators' findings combined:
/// file → timestamp (chronological) → analyte (registry order) → events.
pub type MergedEvents = IndexMap<String, IndexMap<String, TimelineSlice>>;

/// Fold every evaluator's accumulated event dictionary into one combined
/// document.
///
/// Event lists are concatenated, never deduplicated: within a
/// (file, timestamp) bucket the analyte keys appear in the order the
/// evaluators ran, and within an analyte in insertion order. The inputs
/// are cumulative across all files processed so far in the run; callers
/// extracting a per-file document must select the file they want.
pub fn merge<'a>(evaluators: impl IntoIterator<Item = &'a AnalyteEvaluator>) -> MergedEvents {
    let mut merged = MergedEvents::new();
    for evaluator in evaluators {
        let analyte = evaluator.profile().canonical;
        for (file, by_time) in evaluator.events() {
            let file_entry = merged.entry(file.clone()).or_default();
            for (time, events) in by_time {
                file_entry
                    .entry(time.clone())
                    .or_default()
                    .entry(analyte.to_string())
                    .or_default()
                    .extend(events.iter().cloned());
            }
        }
    }
    // Evaluators contribute timestamps in their own encounter order;
    // restore chronological order per file.
    for by_time in merged.values_mut() {
        by_time.sort_keys();
    }
    merged
}
