pub mod strelka_snv;

use getset::Getters;
use serde::Serialize;

use crate::diagnostics::Diagnostics;
use crate::error::Error;
use crate::reader::RecordSource;
use crate::types::FeatureValue;

/// Turns the calls of one caller into a feature table.
pub trait FeatureExtractor {
    /// Identifier the extractor is registered under.
    fn name(&self) -> &'static str;

    /// Extract one row per call of `source`, in source order.
    ///
    /// Anomalies that do not abort the call are reported through `diagnostics`.
    fn collect(
        &self,
        source: &mut dyn RecordSource,
        diagnostics: &mut Diagnostics,
    ) -> anyhow::Result<FeatureTable>;

    /// Columns of the produced table, in order.
    fn columns(&self) -> Vec<&'static str>;

    /// The subset of [`FeatureExtractor::columns`] a classifier is trained on.
    fn training_columns(&self) -> Vec<&'static str>;
}

/// Rows of feature values sharing one column schema.
///
/// The schema is kept even when there are no rows.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
#[getset(get = "pub")]
pub struct FeatureTable {
    columns: Vec<&'static str>,
    rows: Vec<Vec<FeatureValue>>,
}

impl FeatureTable {
    pub fn new(columns: Vec<&'static str>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub(crate) fn push_row(&mut self, row: Vec<FeatureValue>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|&column| column == name)
    }

    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &FeatureValue> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&FeatureValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|row| &row[idx])
    }

    /// A new table with only `columns`, in the given order.
    ///
    /// # Examples
    ///
    /// ```
    /// use strelka_features::features::strelka_snv;
    /// use strelka_features::FeatureTable;
    ///
    /// let table = FeatureTable::new(strelka_snv::columns());
    /// let training = table.select(&strelka_snv::training_columns()).unwrap();
    /// assert_eq!(training.columns(), &strelka_snv::training_columns());
    /// assert!(table.select(&["DEPTH"]).is_err());
    /// ```
    pub fn select(&self, columns: &[&str]) -> Result<FeatureTable, Error> {
        let indices = columns
            .iter()
            .map(|&name| {
                self.column_index(name).ok_or_else(|| Error::UnknownColumn {
                    name: name.into(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FeatureTable {
            columns: indices.iter().map(|&idx| self.columns[idx]).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&idx| row[idx].clone()).collect())
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FeatureTable {
        let mut table = FeatureTable::new(vec!["CHROM", "POS", "MQ_SCORE"]);
        table.push_row(vec!["chr1".into(), 10.into(), FeatureValue::Missing]);
        table.push_row(vec!["chr2".into(), 20.into(), 59.5.into()]);
        table
    }

    #[test]
    fn test_column_access() {
        let table = table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1, "CHROM"), Some(&FeatureValue::Text("chr2".into())));
        assert_eq!(table.get(2, "CHROM"), None);
        let positions: Vec<_> = table.column("POS").unwrap().filter_map(FeatureValue::number).collect();
        assert_eq!(positions, [10.0, 20.0]);
        assert!(table.column("QUAL").is_none());
    }

    #[test]
    fn test_select() {
        let selected = table().select(&["MQ_SCORE", "CHROM"]).unwrap();
        assert_eq!(selected.columns(), &["MQ_SCORE", "CHROM"]);
        assert_eq!(selected.rows()[0], [FeatureValue::Missing, "chr1".into()]);
        assert!(matches!(
            table().select(&["QUAL"]),
            Err(Error::UnknownColumn { name }) if name == "QUAL"
        ));
    }

    #[test]
    fn test_missing_serializes_as_null() {
        let json = serde_json::to_string(&table()).unwrap();
        assert_eq!(
            json,
            r#"{"columns":["CHROM","POS","MQ_SCORE"],"rows":[["chr1",10,null],["chr2",20,59.5]]}"#
        );
    }
}
