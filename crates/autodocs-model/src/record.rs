//! Input rows and the dataset that holds them.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// One row of the uploaded dataset.
///
/// Headers are trimmed when the record is built, and lookup keys are trimmed
/// again before each lookup. A missing column reads as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// 1-based data row index (header rows excluded).
    pub row: usize,
    values: BTreeMap<String, CellValue>,
}

impl PatientRecord {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            values: BTreeMap::new(),
        }
    }

    /// Build a record from `(header, value)` pairs.
    pub fn from_pairs<K, V, I>(row: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<CellValue>,
    {
        let mut record = Self::new(row);
        for (key, value) in pairs {
            record.insert(key.as_ref(), value);
        }
        record
    }

    /// Insert or replace a field. Later duplicates of a header win.
    pub fn insert(&mut self, column: &str, value: impl Into<CellValue>) {
        self.values
            .insert(column.trim().to_string(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.values.get(column.trim())
    }

    /// Whether the dataset carried this column at all, even if blank.
    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column.trim())
    }

    /// Stringified field value; absent fields yield `""`.
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(ToString::to_string).unwrap_or_default()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A loaded table of patient records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Where the rows came from, when loaded from disk.
    pub source: Option<PathBuf>,
    /// Trimmed column headers in file order.
    pub headers: Vec<String>,
    pub records: Vec<PatientRecord>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, records: Vec<PatientRecord>) -> Self {
        Self {
            source: None,
            headers: headers.into_iter().map(|h| h.trim().to_string()).collect(),
            records,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn has_column(&self, column: &str) -> bool {
        let column = column.trim();
        self.headers.iter().any(|h| h == column)
    }

    /// Known columns the dataset does not provide.
    pub fn missing_columns<'a>(&self, expected: &[&'a str]) -> Vec<&'a str> {
        expected
            .iter()
            .copied()
            .filter(|column| !self.has_column(column))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
