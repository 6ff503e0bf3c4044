use indexmap::IndexMap;

use crate::error::Error;
use crate::types::{RawValue, SampleRole};

/// One tokenized variant call: field name to raw value, in the order the record
/// source delivered them.
///
/// Field names follow the extraction convention of the call reader: fixed columns
/// by name (`CHROM`, `POS`, `REF`, `ALT`, `FILTER`), INFO keys as `I.<key>` and
/// per-sample FORMAT keys as `S.<sample>.<key>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: IndexMap<String, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zip a tuple of values with the field names it was requested for.
    pub fn from_values(names: &[&str], values: Vec<RawValue>) -> Result<Self, Error> {
        if names.len() != values.len() {
            return Err(Error::FieldCount {
                expected: names.len(),
                actual: values.len(),
            });
        }
        Ok(names
            .iter()
            .map(|name| name.to_string())
            .zip(values)
            .collect())
    }

    pub fn insert<K: Into<String>, V: Into<RawValue>>(&mut self, field: K, value: V) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn with<K: Into<String>, V: Into<RawValue>>(mut self, field: K, value: V) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.fields.get(field)
    }

    pub fn is_present(&self, field: &str) -> bool {
        self.get(field).map_or(false, |v| !v.is_missing())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn require(&self, field: &str) -> Result<&RawValue, Error> {
        match self.get(field) {
            Some(value) if !value.is_missing() => Ok(value),
            _ => Err(Error::MissingField {
                field: field.into(),
            }),
        }
    }

    pub fn number(&self, field: &str) -> Result<f64, Error> {
        let value = self.require(field)?;
        value.float().ok_or_else(|| Error::InvalidNumber {
            field: field.into(),
            value: value.clone(),
        })
    }

    /// A required FORMAT field of one sample, i.e. `S.<sample>.<tag>`, read as a float.
    pub fn format(&self, role: SampleRole, tag: &str) -> Result<f64, Error> {
        self.number(&role.field(tag))
    }

    pub fn integer(&self, field: &str) -> Result<i64, Error> {
        let value = self.require(field)?;
        value.integer().ok_or_else(|| Error::InvalidInteger {
            field: field.into(),
            value: value.clone(),
        })
    }

    pub fn text(&self, field: &str) -> Result<&str, Error> {
        match self.require(field)? {
            RawValue::String(s) => Ok(s),
            RawValue::Strings(v) if v.len() == 1 => Ok(&v[0]),
            value => Err(Error::InvalidText {
                field: field.into(),
                value: value.clone(),
            }),
        }
    }

    pub fn list(&self, field: &str) -> Result<Vec<&str>, Error> {
        let value = self.require(field)?;
        value.strings().ok_or_else(|| Error::InvalidText {
            field: field.into(),
            value: value.clone(),
        })
    }

    /// The target sequence identifier, i.e. CHROM.
    pub fn chrom(&self) -> Result<&str, Error> {
        self.text("CHROM")
    }

    pub fn pos(&self) -> Result<i64, Error> {
        self.integer("POS")
    }

    pub fn ref_allele(&self) -> Result<&str, Error> {
        self.text("REF")
    }

    /// The alternate alleles, i.e. ALT. A site without alternates reads as `["."]`.
    pub fn alt_alleles(&self) -> Result<Vec<&str>, Error> {
        self.list("ALT")
    }

    pub fn filters(&self) -> Result<Vec<&str>, Error> {
        self.list("FILTER")
    }
}

impl FromIterator<(String, RawValue)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
