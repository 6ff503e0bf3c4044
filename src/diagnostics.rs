use std::fmt;

use indexmap::IndexSet;

/// The anomaly classes that are reported at most once per extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiagnosticKey {
    /// A fixable field was absent and defaulted to 0.
    MissingField(String),
    /// A chromosome has no baseline depth in a non-empty index.
    UnnormalizedChrom(String),
    /// There is no depth index at all.
    NoDepthIndex,
}

impl fmt::Display for DiagnosticKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKey::MissingField(field) => write!(f, "Missing feature {}", field),
            DiagnosticKey::UnnormalizedChrom(chrom) => {
                write!(f, "Cannot normalize depths on {}", chrom)
            }
            DiagnosticKey::NoDepthIndex => write!(f, "Cannot normalize depths."),
        }
    }
}

/// Warn-once context of a single extraction call.
///
/// Every diagnostic goes to the `log` facade at warn level the first time its key
/// is seen; later occurrences are dropped. The emitted keys are kept in order so
/// callers can inspect what was reported. Give each parallel unit its own
/// instance.
///
/// # Examples
///
/// ```
/// use strelka_features::{DiagnosticKey, Diagnostics};
///
/// let mut diagnostics = Diagnostics::new();
/// assert!(diagnostics.warn_once(DiagnosticKey::NoDepthIndex));
/// assert!(!diagnostics.warn_once(DiagnosticKey::NoDepthIndex));
/// assert_eq!(diagnostics.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Diagnostics {
    seen: IndexSet<DiagnosticKey>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `key` unless it was reported before. Returns whether it was emitted.
    pub fn warn_once(&mut self, key: DiagnosticKey) -> bool {
        if self.seen.contains(&key) {
            return false;
        }
        log::warn!("{}", key);
        self.seen.insert(key)
    }

    /// Reported keys, in the order they were first seen.
    pub fn emitted(&self) -> Vec<DiagnosticKey> {
        self.seen.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_distinct_per_class() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.warn_once(DiagnosticKey::MissingField("chr1".into())));
        assert!(diagnostics.warn_once(DiagnosticKey::UnnormalizedChrom("chr1".into())));
        assert!(!diagnostics.warn_once(DiagnosticKey::MissingField("chr1".into())));
        assert_eq!(
            diagnostics.emitted(),
            [
                DiagnosticKey::MissingField("chr1".into()),
                DiagnosticKey::UnnormalizedChrom("chr1".into())
            ]
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            DiagnosticKey::MissingField("I.MQ".into()).to_string(),
            "Missing feature I.MQ"
        );
        assert_eq!(
            DiagnosticKey::UnnormalizedChrom("chrM".into()).to_string(),
            "Cannot normalize depths on chrM"
        );
    }
}
