//! In-memory table of named, ordered columns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::Value;
use crate::error::{Result, SevcountError};

/// Represents parsed tabular data.
///
/// Columns are stored by name in insertion order. Every column holds exactly
/// one value per row; deserialized input that breaks this is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    columns: IndexMap<String, Vec<Value>>,
    row_count: usize,
}

/// Unchecked serialized form of a [`Table`].
#[derive(Deserialize)]
struct RawTable {
    columns: IndexMap<String, Vec<Value>>,
    row_count: usize,
}

impl TryFrom<RawTable> for Table {
    type Error = SevcountError;

    fn try_from(raw: RawTable) -> Result<Self> {
        if let Some((name, values)) = raw
            .columns
            .iter()
            .find(|(_, values)| values.len() != raw.row_count)
        {
            return Err(SevcountError::LengthMismatch {
                column: name.clone(),
                expected: raw.row_count,
                actual: values.len(),
            });
        }
        Ok(Self {
            columns: raw.columns,
            row_count: raw.row_count,
        })
    }
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from column headers and row-major data.
    ///
    /// Short rows are padded with nulls and long rows truncated. A repeated
    /// header replaces the earlier column of the same name.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let row_count = rows.len();
        let mut columns: Vec<(String, Vec<Value>)> = headers
            .into_iter()
            .map(|h| (h, Vec::with_capacity(row_count)))
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for (_, values) in columns.iter_mut() {
                values.push(cells.next().unwrap_or(Value::Null));
            }
        }

        Self {
            columns: columns.into_iter().collect(),
            row_count,
        }
    }

    /// Append a column, consuming and returning the table.
    pub fn with_column<V: Into<Value>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self> {
        self.set_column(name, values.into_iter().map(Into::into).collect())?;
        Ok(self)
    }

    /// Add a column, or overwrite an existing one in place.
    ///
    /// The first column added to an empty table fixes the row count.
    pub fn set_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        let name = name.into();
        if self.columns.is_empty() {
            self.row_count = values.len();
        } else if values.len() != self.row_count {
            return Err(SevcountError::LengthMismatch {
                column: name,
                expected: self.row_count,
                actual: values.len(),
            });
        }
        self.columns.insert(name, values);
        Ok(())
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Whether a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Name of the last column, if any.
    pub fn last_column_name(&self) -> Option<&str> {
        self.columns.last().map(|(name, _)| name.as_str())
    }

    /// Iterate over `(name, values)` pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.columns
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.columns.get(column).and_then(|values| values.get(row))
    }

    /// Iterate over rows as vectors of cell references.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> {
        (0..self.row_count).map(move |i| {
            self.columns
                .values()
                .filter_map(|col| col.get(i))
                .collect()
        })
    }
}
