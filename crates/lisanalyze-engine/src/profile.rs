//! The analyte profile: one evaluator template, reused per analyte
//!
//! Every analyte evaluator runs the same pipeline; what differs between
//! analytes is pure data - canonical name, aliases, canonical unit,
//! reference range, panic thresholds, cross-analyte rules, trend rules.
//! That data lives in a static [`AnalyteProfile`] per analyte (see
//! [`crate::analytes`]).

use crate::convert::MolarBasis;

/// One bound of a built-in reference range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    /// The limit in the analyte's canonical unit
    pub limit: f64,
    /// Event wording for a breach, e.g. "Hypernatremia"
    pub label: &'static str,
}

/// Direction and threshold of a panic (critical value) check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanicKind {
    /// Fires when the normalized value exceeds the threshold
    Above(f64),
    /// Fires when the normalized value falls below the threshold
    Below(f64),
}

/// A critical-value rule, checked unconditionally - independent of
/// whether the value sat inside a caller-supplied reference range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanicRule {
    pub kind: PanicKind,
    /// Exclusive cap: the rule only fires when the value is at or below
    /// this (prolactin's microadenoma band stops where the macroadenoma
    /// band starts)
    pub ceiling: Option<f64>,
    /// Text before the embedded value, e.g. "Severe hypernatremia"
    pub lead: &'static str,
    /// Text after the embedded value, e.g. "; consider ischemia, ..."
    pub trail: &'static str,
}

/// A cross-analyte ratio rule. `check` receives this analyte's normalized
/// value and the partner's, and returns the event text when it fires.
#[derive(Clone, Copy)]
pub struct RatioRule {
    /// Canonical name of the partner analyte to cross-reference
    pub partner: &'static str,
    pub check: fn(own: f64, partner: f64) -> Option<String>,
}

impl std::fmt::Debug for RatioRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatioRule")
            .field("partner", &self.partner)
            .finish_non_exhaustive()
    }
}

/// A documented physiologic correction applied before range checks.
/// `apply` receives this analyte's value and the partner's normalized
/// value and returns the corrected value.
#[derive(Clone, Copy)]
pub struct Correction {
    /// Canonical name of the analyte whose value drives the correction
    pub partner: &'static str,
    pub apply: fn(own: f64, partner: f64) -> f64,
}

impl std::fmt::Debug for Correction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Correction")
            .field("partner", &self.partner)
            .finish_non_exhaustive()
    }
}

/// Trend-failure rules for analytes tracked over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendRule {
    /// Fires when the value exceeds the nadir-so-far by more than this
    pub nadir_delta: f64,
    /// Fires once this many strictly increasing observations occur in a row
    pub consecutive: u32,
    /// Event text for a nadir exceedance
    pub delta_event: &'static str,
    /// Event text for the consecutive-increase failure
    pub consecutive_event: &'static str,
}

/// Everything that distinguishes one analyte's evaluator from another's.
#[derive(Debug, Clone, Copy)]
pub struct AnalyteProfile {
    /// The single standardized key used internally after alias resolution
    pub canonical: &'static str,
    /// Alternate names the source lab may report this analyte under
    pub aliases: &'static [&'static str],
    /// Canonical unit all rule thresholds are expressed in
    pub unit: &'static str,
    /// Built-in upper reference bound; None skips high-side range checks
    pub high: Option<Bound>,
    /// Built-in lower reference bound; None skips low-side range checks
    pub low: Option<Bound>,
    pub panic_rules: &'static [PanicRule],
    pub ratio_rules: &'static [RatioRule],
    pub correction: Option<Correction>,
    pub trend: Option<TrendRule>,
    /// Molar mass for conversions crossing the mass/molar boundary
    pub molar: Option<MolarBasis>,
}
