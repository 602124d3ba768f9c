//! Unit conversion via UCUM
//!
//! Wraps `octofhir-ucum` with two LIS-specific concerns: source systems
//! report units in loose spellings ("mg/dl", "meq/l") that must be mapped
//! to UCUM case-sensitive codes, and several analytes are reported in
//! molar units while their canonical unit is mass-based (or vice versa),
//! which UCUM alone cannot bridge without the analyte's molar mass.

use thiserror::Error;

/// Molar-mass information for analytes whose conversions cross the
/// mass/amount-of-substance boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MolarBasis {
    /// Molar mass in g/mol
    pub molar_mass: f64,
    /// Extra mass-side scale applied after a molar→mass substitution.
    /// BUN uses the urea to urea-nitrogen mass ratio here; everything
    /// else uses 1.0.
    pub mass_scale: f64,
}

impl MolarBasis {
    /// Plain molar mass, no extra scaling.
    pub const fn simple(molar_mass: f64) -> Self {
        Self {
            molar_mass,
            mass_scale: 1.0,
        }
    }
}

/// Errors from the unit-conversion collaborator.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConvertError {
    /// Units live in different dimensions and no molar mass can bridge them
    #[error("cannot convert {from:?} to {to:?}: incompatible dimensions")]
    Incomparable { from: String, to: String },

    /// UCUM could not resolve one of the unit expressions
    #[error("unit {unit:?} not resolvable: {message}")]
    Unresolvable { unit: String, message: String },
}

/// Map a loose LIS unit spelling onto a UCUM code.
///
/// Handles the spellings seen in the wild: lowercase litres, enzyme units
/// written "u", and equivalents ("meq/l"), which for the monovalent
/// electrolytes handled here are interchangeable with moles.
pub fn ucumize(unit: &str) -> String {
    unit.trim()
        .split('/')
        .map(normalize_token)
        .collect::<Vec<_>>()
        .join("/")
}

fn normalize_token(token: &str) -> String {
    match token.trim().to_ascii_lowercase().as_str() {
        "l" => "L".into(),
        "dl" => "dL".into(),
        "ml" => "mL".into(),
        "ul" => "uL".into(),
        "u" => "U".into(),
        "mu" => "mU".into(),
        "iu" => "[iU]".into(),
        "eq" => "mol".into(),
        "meq" => "mmol".into(),
        "ueq" => "umol".into(),
        other => other.to_string(),
    }
}

/// Conversion factor between two dimensionally comparable UCUM units.
fn ucum_factor(from: &str, to: &str) -> Result<Option<f64>, ConvertError> {
    match octofhir_ucum::is_comparable(from, to) {
        Ok(true) => {
            let canon_from =
                octofhir_ucum::get_canonical_units(from).map_err(|e| ConvertError::Unresolvable {
                    unit: from.to_string(),
                    message: e.to_string(),
                })?;
            let canon_to =
                octofhir_ucum::get_canonical_units(to).map_err(|e| ConvertError::Unresolvable {
                    unit: to.to_string(),
                    message: e.to_string(),
                })?;
            Ok(Some(canon_from.factor / canon_to.factor))
        }
        Ok(false) => Ok(None),
        Err(e) => Err(ConvertError::Unresolvable {
            unit: from.to_string(),
            message: e.to_string(),
        }),
    }
}

/// Convert `value` from the reported `from` unit into the canonical `to`
/// unit.
///
/// If the units are not directly comparable and a molar basis is given,
/// the molar side is rewritten in grams (x mmol = x × mw mg) and the
/// conversion retried. Failure is a hard error for the caller's
/// timestamp, never silently swallowed.
pub fn convert(
    value: f64,
    from: &str,
    to: &str,
    molar: Option<MolarBasis>,
) -> Result<f64, ConvertError> {
    let from_n = ucumize(from);
    let to_n = ucumize(to);
    if from_n == to_n {
        return Ok(value);
    }

    if let Some(factor) = ucum_factor(&from_n, &to_n)? {
        return Ok(value * factor);
    }

    if let Some(basis) = molar {
        // Reported in moles, canonical in mass: substitute g for mol and
        // carry the molar mass into the value.
        if from_n.contains("mol") {
            let from_mass = from_n.replace("mol", "g");
            if let Some(factor) = ucum_factor(&from_mass, &to_n)? {
                return Ok(value * basis.molar_mass * factor * basis.mass_scale);
            }
        }
        // Reported in mass, canonical in moles: substitute on the target.
        if to_n.contains("mol") {
            let to_mass = to_n.replace("mol", "g");
            if let Some(factor) = ucum_factor(&from_n, &to_mass)? {
                return Ok(value * factor / basis.molar_mass / basis.mass_scale);
            }
        }
    }

    Err(ConvertError::Incomparable {
        from: from.to_string(),
        to: to.to_string(),
    })
}
