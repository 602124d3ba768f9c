//! The per-file machine-readable output document

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Events detected at one timestamp, keyed by analyte canonical name in
/// registry order.
pub type TimelineSlice = IndexMap<String, Vec<String>>;

/// The merged event document for one input file.
///
/// Serialized shape:
/// `{ <timestamp>: { <analyte>: [event, ...] }, "file_name": ...,
/// "analysis_time": ... }`. The sibling keys cannot collide with a real
/// timestamp because top-level keys were validated as ISO-8601 strings
/// before analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Timestamp → analyte → detected events, in chronological order
    #[serde(flatten)]
    pub timeline: IndexMap<String, TimelineSlice>,
    /// Name of the input file this report was produced from
    pub file_name: String,
    /// Wall-clock time at merge, RFC 3339
    pub analysis_time: String,
}

impl RunReport {
    /// Create an empty report for `file_name`, stamped `analysis_time`.
    pub fn new(file_name: impl Into<String>, analysis_time: impl Into<String>) -> Self {
        Self {
            timeline: IndexMap::new(),
            file_name: file_name.into(),
            analysis_time: analysis_time.into(),
        }
    }

    /// Total number of events across all timestamps.
    pub fn event_count(&self) -> usize {
        self.timeline
            .values()
            .flat_map(|slice| slice.values())
            .map(Vec::len)
            .sum()
    }

    /// Iterate `(timestamp, analyte, event)` triples in document order.
    pub fn events(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.timeline.iter().flat_map(|(time, slice)| {
            slice.iter().flat_map(move |(analyte, events)| {
                events
                    .iter()
                    .map(move |e| (time.as_str(), analyte.as_str(), e.as_str()))
            })
        })
    }
}
