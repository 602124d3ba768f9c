//! Single analyte readings

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A raw laboratory value as it appears in the source file.
///
/// Values are either plain numbers or strings. String values may carry a
/// qualifier: `"> 100"` means "above the assay's measuring range" and
/// `"< 0.01"` means "below the detection limit".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabValue {
    /// Plain numeric reading
    Number(f64),
    /// String reading, possibly qualified with `>` or `<`
    Text(String),
}

/// A lab value after qualifier parsing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedValue {
    /// Ordinary numeric reading
    Numeric(f64),
    /// Qualified with `>`: above the measuring range
    AboveLimit,
    /// Qualified with `<`: below the detection limit
    BelowLimit,
}

impl ParsedValue {
    /// The effective numeric value: `AboveLimit` reads as +infinity,
    /// `BelowLimit` as zero.
    pub fn as_f64(self) -> f64 {
        match self {
            ParsedValue::Numeric(v) => v,
            ParsedValue::AboveLimit => f64::INFINITY,
            ParsedValue::BelowLimit => 0.0,
        }
    }
}

/// A lab value that could not be interpreted as a number.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("unparseable lab value {raw:?}")]
pub struct ValueParseError {
    /// The offending raw text
    pub raw: String,
}

impl LabValue {
    /// Parse the raw value, resolving `>` / `<` qualifiers.
    pub fn parse(&self) -> Result<ParsedValue, ValueParseError> {
        match self {
            LabValue::Number(n) => Ok(ParsedValue::Numeric(*n)),
            LabValue::Text(s) => {
                let t = s.trim();
                if let Some(rest) = t.strip_prefix('>') {
                    rest.trim().parse::<f64>().map_err(|_| ValueParseError {
                        raw: s.clone(),
                    })?;
                    Ok(ParsedValue::AboveLimit)
                } else if let Some(rest) = t.strip_prefix('<') {
                    rest.trim().parse::<f64>().map_err(|_| ValueParseError {
                        raw: s.clone(),
                    })?;
                    Ok(ParsedValue::BelowLimit)
                } else {
                    t.parse::<f64>()
                        .map(ParsedValue::Numeric)
                        .map_err(|_| ValueParseError { raw: s.clone() })
                }
            }
        }
    }
}

impl fmt::Display for LabValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabValue::Number(n) => write!(f, "{n}"),
            LabValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One analyte reading at one timestamp.
///
/// `ref_high` / `ref_low` are reference-range overrides supplied by the
/// source lab; when present they take precedence over any built-in range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// The reported value
    pub lab_value: LabValue,
    /// Unit string as reported by the lab
    pub unit: String,
    /// Lab-supplied upper reference bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_high: Option<f64>,
    /// Lab-supplied lower reference bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_low: Option<f64>,
}

impl Measurement {
    /// Convenience constructor for a plain numeric reading.
    pub fn numeric(value: f64, unit: impl Into<String>) -> Self {
        Self {
            lab_value: LabValue::Number(value),
            unit: unit.into(),
            ref_high: None,
            ref_low: None,
        }
    }
}
