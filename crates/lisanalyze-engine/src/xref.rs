//! The cross-reference protocol
//!
//! A narrow, read-only capability one evaluator uses to obtain another
//! analyte's standardized (value, unit) pair at the same timestamp - for
//! ratio and correction rules - without re-deriving the normalization
//! steps itself and without compile-time coupling between evaluators.
//!
//! Normalization is recomputed on every call by design: results are not
//! cached, and an alias rewrite performed here is visible to every later
//! reader of the same store.

use crate::config::AnalyzeConfig;
use crate::error::{EvalError, EvalResult};
use crate::profile::AnalyteProfile;
use lisanalyze_model::{MeasurementStore, ParsedValue};

/// Lookup handle over the registry's profiles, handed to every evaluator.
#[derive(Debug, Clone, Copy)]
pub struct CrossRef<'a> {
    profiles: &'a [&'static AnalyteProfile],
}

impl<'a> CrossRef<'a> {
    /// Build a cross-reference handle over `profiles` (registry order).
    pub fn new(profiles: &'a [&'static AnalyteProfile]) -> Self {
        Self { profiles }
    }

    /// Find a profile by canonical analyte name.
    pub fn lookup(&self, canonical: &str) -> Option<&'static AnalyteProfile> {
        self.profiles
            .iter()
            .find(|p| p.canonical == canonical)
            .copied()
    }

    /// The normalized (value, canonical unit) pair for `canonical` at
    /// `time`, or `None` if the analyte is not present there.
    ///
    /// Performs alias resolution, presence check, unit validation, value
    /// extraction, unit normalization and analyte-specific correction -
    /// never range, panic or trend checks, and never records events.
    /// Callers must treat `None` as "skip the dependent rule", not as an
    /// error.
    pub fn normalize(
        &self,
        canonical: &str,
        store: &mut MeasurementStore,
        time: &str,
        cfg: &AnalyzeConfig,
    ) -> EvalResult<Option<(f64, &'static str)>> {
        let profile = self
            .lookup(canonical)
            .ok_or_else(|| EvalError::UnknownAnalyte {
                name: canonical.to_string(),
            })?;
        Ok(normalized_value(profile, store, time, cfg, self)?
            .map(|(_, value)| (value, profile.unit)))
    }
}

/// The shared front half of evaluation: alias resolution, presence check,
/// unit validation, value extraction, unit normalization and correction.
///
/// Returns the parsed raw value alongside the normalized one; the
/// evaluator needs both (reference-range overrides compare against the
/// raw value, and qualifiers drive trend-state resets).
pub(crate) fn normalized_value(
    profile: &AnalyteProfile,
    store: &mut MeasurementStore,
    time: &str,
    cfg: &AnalyzeConfig,
    xref: &CrossRef<'_>,
) -> EvalResult<Option<(ParsedValue, f64)>> {
    store.resolve_aliases(time, profile.canonical, profile.aliases);

    let Some(measurement) = store.get(time, profile.canonical) else {
        return Ok(None);
    };
    let unit = measurement.unit.clone();

    if cfg.warn && unit != profile.unit {
        log::warn!(
            "unit mismatch in entry for {time} ({}: {unit:?}, expected {:?})",
            profile.canonical,
            profile.unit
        );
    }

    let parsed = measurement
        .lab_value
        .parse()
        .map_err(|source| EvalError::Value {
            analyte: profile.canonical.to_string(),
            time: time.to_string(),
            source,
        })?;
    let mut value = parsed.as_f64();

    if cfg.convert {
        value = crate::convert::convert(value, &unit, profile.unit, profile.molar).map_err(
            |source| EvalError::Conversion {
                analyte: profile.canonical.to_string(),
                time: time.to_string(),
                source,
            },
        )?;
    }

    if cfg.correct {
        if let Some(correction) = &profile.correction {
            if let Some((partner_value, _)) = xref.normalize(correction.partner, store, time, cfg)?
            {
                value = (correction.apply)(value, partner_value);
            }
        }
    }

    Ok(Some((parsed, value)))
}
