//! The evaluator registry

use crate::analytes;
use crate::profile::AnalyteProfile;
use crate::xref::CrossRef;

/// The fixed, ordered list of analyte profiles active for a run.
///
/// Declared statically at startup - there is no runtime discovery. Order
/// is significant: evaluators run in registry order at every timestamp,
/// which fixes event order within a (file, timestamp) bucket.
#[derive(Debug, Clone)]
pub struct Registry {
    profiles: Vec<&'static AnalyteProfile>,
}

impl Registry {
    /// The standard registry: every built-in analyte.
    pub fn standard() -> Self {
        Self {
            profiles: analytes::STANDARD.to_vec(),
        }
    }

    /// A registry over an explicit profile list (tests, reduced runs).
    pub fn with_profiles(profiles: Vec<&'static AnalyteProfile>) -> Self {
        Self { profiles }
    }

    /// Registered profiles in run order.
    pub fn profiles(&self) -> &[&'static AnalyteProfile] {
        &self.profiles
    }

    /// Number of registered evaluators.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// The cross-reference capability handed to every evaluator.
    pub fn cross_ref(&self) -> CrossRef<'_> {
        CrossRef::new(&self.profiles)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
