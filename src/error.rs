use thiserror::Error;

use crate::types::RawValue;

/// Failures that abort an extraction call.
///
/// Missing-but-fixable fields and chromosomes without a depth baseline are not
/// errors; they are reported through [`crate::Diagnostics`] instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed depth directive {line:?}: {reason}")]
    MalformedDepthDirective { line: String, reason: &'static str },

    #[error("required field {field} is missing")]
    MissingField { field: String },

    #[error("field {field}: {value:?} is not an integer")]
    InvalidInteger { field: String, value: RawValue },

    #[error("field {field}: {value:?} is not a number")]
    InvalidNumber { field: String, value: RawValue },

    #[error("field {field}: {value:?} is not text")]
    InvalidText { field: String, value: RawValue },

    #[error("allele {allele:?} has no per-nucleotide counts")]
    UnknownAllele { allele: String },

    #[error("record carries {actual} values, expected {expected}")]
    FieldCount { expected: usize, actual: usize },

    #[error("no feature extractor registered as {name:?}")]
    UnknownExtractor { name: String },

    #[error("a feature extractor is already registered as {name:?}")]
    DuplicateExtractor { name: String },

    #[error("feature table has no column {name:?}")]
    UnknownColumn { name: String },
}
