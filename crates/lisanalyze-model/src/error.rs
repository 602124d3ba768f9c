//! Load-time errors for LIS data files

use thiserror::Error;

/// Errors raised while loading and validating a LIS data file.
///
/// All of these are fatal for the file in which they occur: no evaluator
/// runs against a file that failed validation.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON or not an object at the top level
    #[error("invalid JSON in {path}: {source}")]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Document is valid JSON but not an object of timestamped entries
    #[error("top-level value in {path} is not an object of timestamped entries")]
    NotADocument { path: String },

    /// Top-level key does not look like an ISO-8601 timestamp
    #[error("top-level key {key:?} is not ISO-8601 formatted")]
    BadTimestampKey { key: String },

    /// Level-1 value is not an object of analyte entries
    #[error("value under {key:?} is not an object")]
    NotAnObject { key: String },
}
