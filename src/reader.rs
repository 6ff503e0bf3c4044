use std::collections::VecDeque;

use crate::record::RawRecord;
use crate::types::RawValue;

/// Tokenized call data as handed over by the call-file reader.
///
/// Both sequences are single pass: header lines are consumed once to build the
/// depth index, and every record is pulled exactly once, in file order.
pub trait RecordSource {
    /// Raw header lines of the call file.
    fn header_lines(&mut self) -> Box<dyn Iterator<Item = String> + '_>;

    /// One tuple per call, holding the value of each of `fields` in that order.
    /// Fields a record does not carry are [`RawValue::Missing`].
    fn records(
        &mut self,
        fields: &[&str],
    ) -> Box<dyn Iterator<Item = anyhow::Result<Vec<RawValue>>> + '_>;
}

/// An in-memory [`RecordSource`] for calls that have already been tokenized.
///
/// # Examples
///
/// ```
/// use strelka_features::{RawRecord, RecordBuffer, RecordSource, RawValue};
///
/// let mut source = RecordBuffer::new()
///     .with_header_line("##maxDepth_chr1=30")
///     .with_record(RawRecord::new().with("CHROM", "chr1").with("POS", 100));
/// let tuples: Vec<_> = source
///     .records(&["POS", "CHROM", "REF"])
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(tuples, [vec![RawValue::Integer(100), "chr1".into(), RawValue::Missing]]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordBuffer {
    header: VecDeque<String>,
    records: VecDeque<RawRecord>,
}

impl RecordBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_header_line<S: Into<String>>(&mut self, line: S) {
        self.header.push_back(line.into());
    }

    pub fn push_record(&mut self, record: RawRecord) {
        self.records.push_back(record);
    }

    pub fn with_header_line<S: Into<String>>(mut self, line: S) -> Self {
        self.push_header_line(line);
        self
    }

    pub fn with_record(mut self, record: RawRecord) -> Self {
        self.push_record(record);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSource for RecordBuffer {
    fn header_lines(&mut self) -> Box<dyn Iterator<Item = String> + '_> {
        Box::new(self.header.drain(..))
    }

    fn records(
        &mut self,
        fields: &[&str],
    ) -> Box<dyn Iterator<Item = anyhow::Result<Vec<RawValue>>> + '_> {
        let fields: Vec<String> = fields.iter().map(|field| field.to_string()).collect();
        Box::new(self.records.drain(..).map(move |record| {
            Ok(fields
                .iter()
                .map(|field| record.get(field).cloned().unwrap_or(RawValue::Missing))
                .collect())
        }))
    }
}

impl FromIterator<RawRecord> for RecordBuffer {
    fn from_iter<I: IntoIterator<Item = RawRecord>>(iter: I) -> Self {
        Self {
            header: VecDeque::new(),
            records: iter.into_iter().collect(),
        }
    }
}
