use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{DiagnosticKey, Diagnostics};
use crate::error::Error;
use crate::parser::depth_directive;

/// Per-chromosome baseline depths, used to normalize observed sample depth.
///
/// Chromosome names keep the case they have in the header. An empty index is
/// valid and means normalization is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, f64>", into = "IndexMap<String, f64>")]
pub struct ChromDepthIndex {
    depths: IndexMap<String, f64>,
}

impl ChromDepthIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan header lines for `##maxDepth_<CHROM>=<depth>` directives.
    ///
    /// Later directives for the same chromosome overwrite earlier ones. A malformed
    /// directive fails the whole scan.
    ///
    /// # Examples
    ///
    /// ```
    /// use strelka_features::ChromDepthIndex;
    ///
    /// let header = ["##fileformat=VCFv4.1", "##maxDepth_chr1=32.5", "##MAXDEPTH_chrX=15"];
    /// let index = ChromDepthIndex::from_header_lines(header.iter()).unwrap();
    /// assert_eq!(index.get("chr1"), Some(32.5));
    /// assert_eq!(index.get("chrX"), Some(15.0));
    /// assert_eq!(index.get("chr2"), None);
    /// ```
    pub fn from_header_lines<I, S>(lines: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        for line in lines {
            if let Some(directive) = depth_directive(line.as_ref()) {
                let (chrom, depth) = directive?;
                index.depths.insert(chrom.into(), depth);
            }
        }
        log::debug!("read baseline depths for {} chromosomes", index.len());
        Ok(index)
    }

    /// Add or replace the baseline of `chrom`. The depth has to be positive.
    pub fn insert<S: Into<String>>(&mut self, chrom: S, depth: f64) -> Result<(), Error> {
        let chrom = chrom.into();
        if !(depth.is_finite() && depth > 0.0) {
            return Err(Error::MalformedDepthDirective {
                line: format!("{}={}", chrom, depth),
                reason: "depth must be positive",
            });
        }
        self.depths.insert(chrom, depth);
        Ok(())
    }

    pub fn get(&self, chrom: &str) -> Option<f64> {
        self.depths.get(chrom).copied()
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.depths.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Render the index as header directives, in insertion order.
    pub fn to_header_lines(&self) -> Vec<String> {
        self.iter()
            .map(|(chrom, depth)| format!("##maxDepth_{}={}", chrom, depth))
            .collect()
    }

    /// The baseline depth to normalize `chrom` against.
    ///
    /// `None` if there is none; that is reported once per chromosome, or once in
    /// total if the index is empty.
    pub fn baseline(&self, chrom: &str, diagnostics: &mut Diagnostics) -> Option<f64> {
        if self.is_empty() {
            diagnostics.warn_once(DiagnosticKey::NoDepthIndex);
            return None;
        }
        let depth = self.get(chrom);
        if depth.is_none() {
            diagnostics.warn_once(DiagnosticKey::UnnormalizedChrom(chrom.into()));
        }
        depth
    }
}

impl TryFrom<IndexMap<String, f64>> for ChromDepthIndex {
    type Error = Error;

    fn try_from(depths: IndexMap<String, f64>) -> Result<Self, Self::Error> {
        let mut index = Self::new();
        for (chrom, depth) in depths {
            index.insert(chrom, depth)?;
        }
        Ok(index)
    }
}

impl From<ChromDepthIndex> for IndexMap<String, f64> {
    fn from(index: ChromDepthIndex) -> Self {
        index.depths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_header() {
        let index = ChromDepthIndex::from_header_lines(Vec::<String>::new()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_later_directive_wins() {
        let index = ChromDepthIndex::from_header_lines(vec![
            "##maxDepth_chr1=10".to_string(),
            "##maxDepth_chr1=20".to_string(),
        ])
        .unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("chr1"), Some(20.0));
    }

    #[test]
    fn test_malformed_directive_is_fatal() {
        let result = ChromDepthIndex::from_header_lines(&["##maxDepth_chr1=12", "##maxDepth_chr2=x"]);
        assert!(matches!(result, Err(Error::MalformedDepthDirective { .. })));
    }

    #[test]
    fn test_header_lines_round_trip() {
        let mut index = ChromDepthIndex::new();
        index.insert("chr2", 41.5).unwrap();
        index.insert("chr1", 12.0).unwrap();
        let lines = index.to_header_lines();
        assert_eq!(lines, ["##maxDepth_chr2=41.5", "##maxDepth_chr1=12"]);
        assert_eq!(ChromDepthIndex::from_header_lines(&lines).unwrap(), index);
    }

    #[test]
    fn test_insert_rejects_non_positive_depth() {
        let mut index = ChromDepthIndex::new();
        assert!(index.insert("chr1", 0.0).is_err());
        assert!(index.insert("chr1", f64::NAN).is_err());
        assert!(index.is_empty());
    }

    #[test]
    fn test_baseline_warns_once() {
        let mut diagnostics = Diagnostics::new();
        let mut index = ChromDepthIndex::new();
        index.insert("chr1", 30.0).unwrap();
        assert_eq!(index.baseline("chr1", &mut diagnostics), Some(30.0));
        assert_eq!(index.baseline("chr7", &mut diagnostics), None);
        assert_eq!(index.baseline("chr7", &mut diagnostics), None);
        assert_eq!(
            diagnostics.emitted(),
            [DiagnosticKey::UnnormalizedChrom("chr7".into())]
        );

        let mut diagnostics = Diagnostics::new();
        let empty = ChromDepthIndex::new();
        assert_eq!(empty.baseline("chr1", &mut diagnostics), None);
        assert_eq!(empty.baseline("chr2", &mut diagnostics), None);
        assert_eq!(diagnostics.emitted(), [DiagnosticKey::NoDepthIndex]);
    }

    #[test]
    fn test_deserialize_validates() {
        let index: ChromDepthIndex = serde_json::from_str(r#"{"chr1": 25.0}"#).unwrap();
        assert_eq!(index.get("chr1"), Some(25.0));
        assert!(serde_json::from_str::<ChromDepthIndex>(r#"{"chr1": -1.0}"#).is_err());
    }
}
