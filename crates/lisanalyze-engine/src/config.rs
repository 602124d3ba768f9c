//! Run configuration consumed by the engine

/// Switches the core consumes from the CLI layer.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzeConfig {
    /// Disable the ISO-8601 timestamp key check at load time
    pub compat: bool,
    /// Emit diagnostics for unit mismatches and built-in range fallbacks
    pub warn: bool,
    /// Convert readings into each analyte's canonical unit
    pub convert: bool,
    /// Apply documented physiologic corrections (glucose-corrected sodium,
    /// albumin-corrected calcium)
    pub correct: bool,
    /// Suppress explanatory detail appended to human-readable events
    pub quiet: bool,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            compat: false,
            warn: false,
            convert: false,
            correct: true,
            quiet: false,
        }
    }
}
