use indexmap::IndexMap;
use serde::Deserialize;

use crate::depth::ChromDepthIndex;
use crate::error::Error;
use crate::features::strelka_snv::{self, StrelkaSnvFeatures};
use crate::features::FeatureExtractor;

/// Settings a dispatcher hands to every extractor it creates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractorOptions {
    /// Precomputed baseline depths; replaces the header directives of the input.
    pub chrom_depth: Option<ChromDepthIndex>,
}

pub type Constructor = fn(&ExtractorOptions) -> Box<dyn FeatureExtractor>;

fn new_strelka_snv(options: &ExtractorOptions) -> Box<dyn FeatureExtractor> {
    let extractor = match &options.chrom_depth {
        Some(chrom_depth) => StrelkaSnvFeatures::new().with_chrom_depth(chrom_depth.clone()),
        None => StrelkaSnvFeatures::new(),
    };
    Box::new(extractor)
}

/// Feature extractors by identifier.
///
/// # Examples
///
/// ```
/// use strelka_features::{ExtractorOptions, FeatureExtractor, Registry};
///
/// let registry = Registry::default();
/// let extractor = registry.create("strelka.snv", &ExtractorOptions::default()).unwrap();
/// assert_eq!(extractor.name(), "strelka.snv");
/// assert!(registry.create("strelka.indel", &ExtractorOptions::default()).is_err());
/// ```
#[derive(Clone)]
pub struct Registry {
    constructors: IndexMap<&'static str, Constructor>,
}

impl Registry {
    pub fn empty() -> Self {
        Self {
            constructors: IndexMap::new(),
        }
    }

    pub fn register(&mut self, name: &'static str, constructor: Constructor) -> Result<(), Error> {
        if self.constructors.contains_key(name) {
            return Err(Error::DuplicateExtractor { name: name.into() });
        }
        self.constructors.insert(name, constructor);
        Ok(())
    }

    pub fn create(
        &self,
        name: &str,
        options: &ExtractorOptions,
    ) -> Result<Box<dyn FeatureExtractor>, Error> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| Error::UnknownExtractor { name: name.into() })?;
        Ok(constructor(options))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.constructors.insert(strelka_snv::NAME, new_strelka_snv);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::reader::RecordBuffer;

    #[test]
    fn test_default_names() {
        assert_eq!(Registry::default().names().collect::<Vec<_>>(), ["strelka.snv"]);
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = Registry::default();
        assert!(matches!(
            registry.register(strelka_snv::NAME, new_strelka_snv),
            Err(Error::DuplicateExtractor { .. })
        ));

        let mut registry = Registry::empty();
        registry.register("snv", new_strelka_snv).unwrap();
        assert_eq!(registry.create("snv", &ExtractorOptions::default()).unwrap().name(), strelka_snv::NAME);
    }

    #[test]
    fn test_options_from_config() {
        let options: ExtractorOptions =
            serde_json::from_str(r#"{"chrom_depth": {"chr1": 35.0}}"#).unwrap();
        assert_eq!(options.chrom_depth.as_ref().and_then(|d| d.get("chr1")), Some(35.0));
        assert_eq!(serde_json::from_str::<ExtractorOptions>("{}").unwrap(), ExtractorOptions::default());

        let extractor = Registry::default().create(strelka_snv::NAME, &options).unwrap();
        let table = extractor
            .collect(&mut RecordBuffer::new(), &mut Diagnostics::new())
            .unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns(), &extractor.columns());
    }
}
