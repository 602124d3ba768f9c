//! The measurement store for one patient file

use crate::measurement::Measurement;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// All analyte entries recorded at a single timestamp.
pub type TimeSlice = IndexMap<String, Measurement>;

/// The validated, time-keyed structure of raw lab entries for one patient
/// file: timestamp string → analyte canonical/alias name → measurement.
///
/// The store is read-only after loading, except for alias resolution, which
/// may copy a measurement under its canonical key (additive - alias entries
/// are never removed).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementStore {
    entries: IndexMap<String, TimeSlice>,
}

impl MeasurementStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timestamps in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no timestamps.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Timestamps in ascending lexicographic order, which for ISO-8601
    /// keys is chronological order.
    pub fn sorted_times(&self) -> Vec<String> {
        let mut times: Vec<String> = self.entries.keys().cloned().collect();
        times.sort();
        times
    }

    /// All top-level keys in file order (used by validation).
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// The slice of entries at `time`, if any.
    pub fn slice(&self, time: &str) -> Option<&TimeSlice> {
        self.entries.get(time)
    }

    /// The measurement for `analyte` at `time`, if any.
    pub fn get(&self, time: &str, analyte: &str) -> Option<&Measurement> {
        self.entries.get(time).and_then(|slice| slice.get(analyte))
    }

    /// Insert a measurement for `analyte` at `time`, creating the time
    /// slice on demand.
    pub fn insert(&mut self, time: impl Into<String>, analyte: impl Into<String>, m: Measurement) {
        self.entries
            .entry(time.into())
            .or_default()
            .insert(analyte.into(), m);
    }

    /// Copy each alias entry present at `time` under `canonical`, unless a
    /// canonical entry already exists. Additive and idempotent: alias keys
    /// are left in place and a genuine canonical reading is never
    /// overwritten.
    pub fn resolve_aliases(&mut self, time: &str, canonical: &str, aliases: &[&str]) {
        let Some(slice) = self.entries.get_mut(time) else {
            return;
        };
        if slice.contains_key(canonical) {
            return;
        }
        for alias in aliases {
            if let Some(m) = slice.get(*alias).cloned() {
                slice.insert(canonical.to_string(), m);
                return;
            }
        }
    }
}
