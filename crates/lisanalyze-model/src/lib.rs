//! Data model for LIS (laboratory information system) result analysis
//!
//! This crate provides:
//! - [`Measurement`] and [`LabValue`] - one analyte reading at one timestamp
//! - [`MeasurementStore`] - the validated, time-keyed structure for one
//!   patient file
//! - [`load_file`] / [`load_str`] - JSON loading with schema validation
//! - [`RunReport`] - the per-file machine-readable output document

pub mod error;
pub mod loader;
pub mod measurement;
pub mod report;
pub mod store;

pub use error::LoadError;
pub use loader::{load_file, load_str};
pub use measurement::{LabValue, Measurement, ParsedValue};
pub use report::RunReport;
pub use store::{MeasurementStore, TimeSlice};
