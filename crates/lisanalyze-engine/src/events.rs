//! Per-evaluator event accumulation

use indexmap::IndexMap;

/// One evaluator's accumulated findings:
/// file name → timestamp → events in insertion order.
pub type EventDict = IndexMap<String, IndexMap<String, Vec<String>>>;

/// An append-only event log owned by one evaluator.
///
/// Grows monotonically for the lifetime of a run and is never cleared;
/// buckets are created on demand.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: EventDict,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `event` under `[file][time]`, preserving insertion order.
    pub fn record(&mut self, file: &str, time: &str, event: String) {
        self.events
            .entry(file.to_string())
            .or_default()
            .entry(time.to_string())
            .or_default()
            .push(event);
    }

    /// The full accumulated dictionary, across all files seen this run.
    pub fn dict(&self) -> &EventDict {
        &self.events
    }

    /// Events recorded for `(file, time)`, if any.
    pub fn bucket(&self, file: &str, time: &str) -> Option<&[String]> {
        self.events
            .get(file)
            .and_then(|by_time| by_time.get(time))
            .map(Vec::as_slice)
    }

    /// Total number of recorded events.
    pub fn len(&self) -> usize {
        self.events
            .values()
            .flat_map(|by_time| by_time.values())
            .map(Vec::len)
            .sum()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
