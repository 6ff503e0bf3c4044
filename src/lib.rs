//! Feature extraction from tokenized somatic SNV calls.
//!
//! Raw call records go through three steps: missing annotations that the caller
//! sometimes omits are defaulted ([`sanitize`]), per-sample depths are normalized
//! against the `##maxDepth_<CHROM>` baselines of the header ([`ChromDepthIndex`]),
//! and allele support is turned into tier1/tier2 alternate-allele rates
//! ([`alt_rates`]). The result is a [`FeatureTable`] with a fixed column schema.
//!
//! Extractors are looked up by name in a [`Registry`].

pub mod alleles;
pub mod depth;
pub mod diagnostics;
pub mod error;
pub mod features;
pub(crate) mod parser;
pub mod reader;
pub mod record;
pub mod registry;
pub mod sanitize;
pub mod types;

pub use alleles::{alt_rates, AlleleCounts, AltAlleles, AltRates, TierCounts};
pub use depth::ChromDepthIndex;
pub use diagnostics::{DiagnosticKey, Diagnostics};
pub use error::Error;
pub use features::strelka_snv::StrelkaSnvFeatures;
pub use features::{FeatureExtractor, FeatureTable};
pub use reader::{RecordBuffer, RecordSource};
pub use record::RawRecord;
pub use registry::{ExtractorOptions, Registry};
pub use sanitize::sanitize;
pub use types::{FeatureValue, Nucleotide, RawValue, SampleRole};

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_empty_input() {
        let extractor = Registry::default()
            .create("strelka.snv", &ExtractorOptions::default())
            .unwrap();
        let mut diagnostics = Diagnostics::new();
        let table = extractor
            .collect(&mut RecordBuffer::new(), &mut diagnostics)
            .unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 26);
        assert!(diagnostics.is_empty());
    }
}
