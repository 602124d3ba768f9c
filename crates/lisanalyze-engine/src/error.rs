//! Evaluation errors

use crate::convert::ConvertError;
use lisanalyze_model::measurement::ValueParseError;
use thiserror::Error;

/// Result type for engine operations
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors raised while evaluating a timestamp.
///
/// A missing analyte at a timestamp is *not* an error - evaluators and
/// cross-reference callers signal that as an absent value and skip.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The unit-conversion collaborator could not normalize the reading.
    /// Hard failure for this timestamp's evaluator call.
    #[error("unit conversion failed for {analyte} at {time}: {source}")]
    Conversion {
        analyte: String,
        time: String,
        #[source]
        source: ConvertError,
    },

    /// The reported lab value could not be parsed as a number
    #[error("bad lab value for {analyte} at {time}: {source}")]
    Value {
        analyte: String,
        time: String,
        #[source]
        source: ValueParseError,
    },

    /// A correction or ratio rule names a partner analyte that is not in
    /// the registry. Distinct from "not measured at this timestamp".
    #[error("cross-reference to unknown analyte {name:?}")]
    UnknownAnalyte { name: String },
}
