//! JSON loading and schema validation for LIS data files

use crate::error::LoadError;
use crate::store::MeasurementStore;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

/// ISO-8601 prefix expected of every top-level key (`YYYY-MM-DDTHH:MM`).
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}").unwrap());

/// Load and validate one LIS data file.
///
/// `compat` disables the ISO-8601 key check (the level-1 object check
/// always runs). Any failure is fatal for the file: no evaluator sees a
/// store that did not validate.
pub fn load_file(path: impl AsRef<Path>, compat: bool) -> Result<MeasurementStore, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_str(&text, &path.display().to_string(), compat)
}

/// Load and validate LIS data from a JSON string.
pub fn load_str(text: &str, path: &str, compat: bool) -> Result<MeasurementStore, LoadError> {
    // Validate shape on the raw JSON first so that a malformed level-1
    // value reports NotAnObject rather than a serde type error.
    let raw: serde_json::Value =
        serde_json::from_str(text).map_err(|source| LoadError::InvalidJson {
            path: path.to_string(),
            source,
        })?;
    let serde_json::Value::Object(map) = &raw else {
        return Err(LoadError::NotADocument {
            path: path.to_string(),
        });
    };

    for (key, value) in map {
        if !compat && !TIME_RE.is_match(key) {
            return Err(LoadError::BadTimestampKey { key: key.clone() });
        }
        if !value.is_object() {
            return Err(LoadError::NotAnObject { key: key.clone() });
        }
    }

    serde_json::from_value(raw).map_err(|source| LoadError::InvalidJson {
        path: path.to_string(),
        source,
    })
}
