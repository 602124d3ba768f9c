//! The analyte evaluator

use crate::config::AnalyzeConfig;
use crate::error::EvalResult;
use crate::events::{EventDict, EventLog};
use crate::profile::{AnalyteProfile, PanicKind};
use crate::xref::{normalized_value, CrossRef};
use lisanalyze_model::{MeasurementStore, ParsedValue};

/// Trend-tracking state carried across calls (and across files within one
/// run).
#[derive(Debug, Clone)]
pub struct TrendState {
    /// Running minimum-so-far of the normalized value
    pub nadir: f64,
    /// The previously observed value
    pub last: Option<f64>,
    /// Consecutive strictly-increasing observations so far
    pub increases: u32,
}

impl Default for TrendState {
    fn default() -> Self {
        Self {
            nadir: f64::INFINITY,
            last: None,
            increases: 0,
        }
    }
}

/// One analyte's evaluator: a static profile plus the per-run mutable
/// state and event log.
#[derive(Debug, Clone)]
pub struct AnalyteEvaluator {
    profile: &'static AnalyteProfile,
    state: TrendState,
    log: EventLog,
}

impl AnalyteEvaluator {
    /// Create a fresh evaluator for `profile` with empty state.
    pub fn new(profile: &'static AnalyteProfile) -> Self {
        Self {
            profile,
            state: TrendState::default(),
            log: EventLog::new(),
        }
    }

    /// The profile this evaluator runs.
    pub fn profile(&self) -> &'static AnalyteProfile {
        self.profile
    }

    /// This evaluator's accumulated findings for the whole run.
    pub fn events(&self) -> &EventDict {
        self.log.dict()
    }

    /// Current trend state (tests and diagnostics).
    pub fn trend_state(&self) -> &TrendState {
        &self.state
    }

    /// Evaluate this analyte at one timestamp of one file.
    ///
    /// Returns `Ok(false)` unconditionally on completion; the return
    /// value is reserved for future short-circuit signaling of the
    /// timestamp loop. When the analyte is absent at `time` the call is a
    /// no-op: no events, no state mutation.
    pub fn evaluate(
        &mut self,
        file: &str,
        store: &mut MeasurementStore,
        time: &str,
        cfg: &AnalyzeConfig,
        xref: &CrossRef<'_>,
    ) -> EvalResult<bool> {
        let Some((parsed, value)) = normalized_value(self.profile, store, time, cfg, xref)? else {
            return Ok(false);
        };

        // Qualified readings reset the nadir before any trend math runs.
        if self.profile.trend.is_some() {
            match parsed {
                ParsedValue::AboveLimit => self.state.nadir = f64::INFINITY,
                ParsedValue::BelowLimit => self.state.nadir = 0.0,
                ParsedValue::Numeric(_) => {}
            }
        }

        self.check_range(file, store, time, cfg, parsed, value);
        self.check_panic(file, time, value);
        self.check_ratios(file, store, time, cfg, xref, value)?;
        self.check_trend(file, time, cfg, value);

        Ok(false)
    }

    /// Out-of-range events. Caller-supplied `ref_high`/`ref_low` always
    /// take precedence over the built-in range and are compared against
    /// the raw value; the built-in fallback compares the normalized one.
    fn check_range(
        &mut self,
        file: &str,
        store: &MeasurementStore,
        time: &str,
        cfg: &AnalyzeConfig,
        parsed: ParsedValue,
        value: f64,
    ) {
        let Some(m) = store.get(time, self.profile.canonical) else {
            return;
        };
        let m = m.clone();
        let raw = parsed.as_f64();
        let unit = self.profile.unit;

        if let Some(high) = &self.profile.high {
            if let Some(ref_high) = m.ref_high {
                if raw > ref_high {
                    self.log.record(
                        file,
                        time,
                        format!(
                            "{} (current value {}; reference value {} ({}))",
                            high.label, m.lab_value, ref_high, m.unit
                        ),
                    );
                }
            } else {
                if cfg.warn {
                    log::warn!(
                        "higher reference value not provided for {} at {time}; falling back to built-in value",
                        self.profile.canonical
                    );
                }
                if value > high.limit {
                    self.log.record(
                        file,
                        time,
                        format!(
                            "{} (current value {value}; reference value {} ({unit}))",
                            high.label, high.limit
                        ),
                    );
                }
            }
        }

        if let Some(low) = &self.profile.low {
            if let Some(ref_low) = m.ref_low {
                if raw < ref_low {
                    self.log.record(
                        file,
                        time,
                        format!(
                            "{} (current value {}; reference value {} ({}))",
                            low.label, m.lab_value, ref_low, m.unit
                        ),
                    );
                }
            } else {
                if cfg.warn {
                    log::warn!(
                        "lower reference value not provided for {} at {time}; falling back to built-in value",
                        self.profile.canonical
                    );
                }
                if value < low.limit {
                    self.log.record(
                        file,
                        time,
                        format!(
                            "{} (current value {value}; reference value {} ({unit}))",
                            low.label, low.limit
                        ),
                    );
                }
            }
        }
    }

    /// Panic-threshold events. These run unconditionally against the
    /// normalized value, even when a caller-supplied range kept the value
    /// "in range".
    fn check_panic(&mut self, file: &str, time: &str, value: f64) {
        let unit = self.profile.unit;
        for rule in self.profile.panic_rules {
            let breached = match rule.kind {
                PanicKind::Above(threshold) => value > threshold,
                PanicKind::Below(threshold) => value < threshold,
            };
            let capped = rule.ceiling.is_some_and(|ceiling| value > ceiling);
            if breached && !capped {
                self.log.record(
                    file,
                    time,
                    format!("{} ({value} ({unit})){}", rule.lead, rule.trail),
                );
            }
        }
    }

    /// Cross-analyte ratio events. An absent partner skips the rule for
    /// this timestamp; it is not an error.
    fn check_ratios(
        &mut self,
        file: &str,
        store: &mut MeasurementStore,
        time: &str,
        cfg: &AnalyzeConfig,
        xref: &CrossRef<'_>,
        value: f64,
    ) -> EvalResult<()> {
        for rule in self.profile.ratio_rules {
            if let Some((partner_value, _)) = xref.normalize(rule.partner, store, time, cfg)? {
                if let Some(event) = (rule.check)(value, partner_value) {
                    self.log.record(file, time, event);
                }
            }
        }
        Ok(())
    }

    /// Trend-failure events. The nadir update precedes the exceedance
    /// check; the two rules never suppress each other.
    fn check_trend(&mut self, file: &str, time: &str, cfg: &AnalyzeConfig, value: f64) {
        let Some(trend) = &self.profile.trend else {
            return;
        };
        let unit = self.profile.unit;

        if value < self.state.nadir {
            self.state.nadir = value;
        }
        if value - self.state.nadir > trend.nadir_delta {
            let mut event = trend.delta_event.to_string();
            if !cfg.quiet {
                event.push_str(&format!(
                    " (nadir = {}, value = {value} ({unit}))",
                    self.state.nadir
                ));
            }
            self.log.record(file, time, event);
        }

        match self.state.last {
            Some(last) if value > last => self.state.increases += 1,
            _ => self.state.increases = 0,
        }
        if self.state.increases >= trend.consecutive {
            let mut event = trend.consecutive_event.to_string();
            if !cfg.quiet {
                event.push_str(&format!(
                    " (nadir = {}, value = {value} ({unit}))",
                    self.state.nadir
                ));
            }
            self.log.record(file, time, event);
        }
        self.state.last = Some(value);
    }
}
