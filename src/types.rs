use itertools::Itertools;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The `.` value a caller writes for "no alternate allele".
pub const NO_CALL: &str = ".";

/// A raw field value as handed over by the record source.
///
/// Mirrors what a VCF field can hold once tokenized: a scalar, a string, a list of
/// strings (ALT, FILTER) or a small numeric array (the per-nucleotide tier counts).
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Missing,
    Integer(i64),
    Float(f64),
    String(String),
    Strings(Vec<String>),
    Counts(Vec<f64>),
}

impl RawValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, RawValue::Missing)
    }

    pub fn float(&self) -> Option<f64> {
        match self {
            RawValue::Integer(v) => Some(*v as f64),
            RawValue::Float(v) => Some(*v),
            RawValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Interpret this value as an integer. Finite floats are truncated towards zero.
    pub fn integer(&self) -> Option<i64> {
        match self {
            RawValue::Integer(v) => Some(*v),
            RawValue::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            RawValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn strings(&self) -> Option<Vec<&str>> {
        match self {
            RawValue::String(s) => Some(s.split(',').collect()),
            RawValue::Strings(v) => Some(v.iter().map(String::as_str).collect()),
            _ => None,
        }
    }

    /// Tier1/tier2 counts of a per-nucleotide array.
    ///
    /// The array has to hold exactly two counts. A scalar `0`, the sanitized default,
    /// reads as no support at either tier; any other scalar is not a pair.
    pub fn tier_pair(&self) -> Option<[f64; 2]> {
        match self {
            RawValue::Counts(v) => match v.as_slice() {
                &[tier1, tier2] => Some([tier1, tier2]),
                _ => None,
            },
            RawValue::Integer(0) => Some([0.0, 0.0]),
            RawValue::Float(v) if *v == 0.0 => Some([0.0, 0.0]),
            _ => None,
        }
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Integer(v)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Integer(v.into())
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::String(v.into())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::String(v)
    }
}

impl From<Vec<&str>> for RawValue {
    fn from(v: Vec<&str>) -> Self {
        RawValue::Strings(v.into_iter().map(Into::into).collect())
    }
}

impl From<[f64; 2]> for RawValue {
    fn from(v: [f64; 2]) -> Self {
        RawValue::Counts(v.to_vec())
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(RawValue::Missing, Into::into)
    }
}

/// One cell of a feature table.
///
/// `Missing` is the "unavailable" marker and is kept apart from a measured zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Missing,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FeatureValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, FeatureValue::Missing)
    }

    pub fn number(&self) -> Option<f64> {
        match self {
            FeatureValue::Integer(v) => Some(*v as f64),
            FeatureValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<&RawValue> for FeatureValue {
    fn from(raw: &RawValue) -> Self {
        match raw {
            RawValue::Missing => FeatureValue::Missing,
            RawValue::Integer(v) => FeatureValue::Integer(*v),
            RawValue::Float(v) => FeatureValue::Float(*v),
            RawValue::String(s) => FeatureValue::Text(s.clone()),
            RawValue::Strings(v) => FeatureValue::Text(v.join(",")),
            RawValue::Counts(v) => FeatureValue::Text(v.iter().join(",")),
        }
    }
}

impl From<Option<f64>> for FeatureValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(FeatureValue::Missing, FeatureValue::Float)
    }
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Float(v)
    }
}

impl From<i32> for FeatureValue {
    fn from(v: i32) -> Self {
        FeatureValue::Integer(v.into())
    }
}

impl From<i64> for FeatureValue {
    fn from(v: i64) -> Self {
        FeatureValue::Integer(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        FeatureValue::Text(v.into())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, IntoStaticStr, Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
}

/// The two samples of a tumor/normal call; sample 1 is the normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SampleRole {
    Normal,
    Tumor,
}

impl SampleRole {
    pub fn index(self) -> usize {
        match self {
            SampleRole::Normal => 1,
            SampleRole::Tumor => 2,
        }
    }

    pub fn field(self, key: &str) -> String {
        format!("S.{}.{}", self.index(), key)
    }

    pub fn count_field(self, base: Nucleotide) -> String {
        format!("S.{}.{}U", self.index(), base)
    }
}
