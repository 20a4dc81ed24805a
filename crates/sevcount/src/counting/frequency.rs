//! Per-severity frequency tables for a single column.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SevcountError};
use crate::input::{Table, Value};
use crate::severity::SEVERITY_COLUMN;

/// One distinct (severity, value) pair and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRow {
    pub severity: Value,
    pub value: Value,
    pub count: usize,
}

/// Counts of each value of a column within each severity category.
///
/// Rows are sorted ascending by severity, then value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyTable {
    column: String,
    rows: Vec<FrequencyRow>,
}

impl FrequencyTable {
    /// The grouped column.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Name of the count column, `"<column> Count"`.
    pub fn count_column(&self) -> String {
        format!("{} Count", self.column)
    }

    /// Output column names: severity, grouped column, count column.
    pub fn column_names(&self) -> [String; 3] {
        [
            SEVERITY_COLUMN.to_string(),
            self.column.clone(),
            self.count_column(),
        ]
    }

    pub fn rows(&self) -> &[FrequencyRow] {
        &self.rows
    }

    /// Number of distinct (severity, value) pairs.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|r| r.count).sum()
    }

    /// Count for one (severity, value) pair, if it was observed.
    pub fn count_for(&self, severity: &Value, value: &Value) -> Option<usize> {
        self.rows
            .iter()
            .find(|r| &r.severity == severity && &r.value == value)
            .map(|r| r.count)
    }

    /// Materialize as a three-column [`Table`].
    pub fn to_table(&self) -> Table {
        let [severity, column, count] = self.column_names();
        let rows = self
            .rows
            .iter()
            .map(|r| vec![r.severity.clone(), r.value.clone(), count_value(r.count)])
            .collect();
        Table::from_rows(vec![severity, column, count], rows)
    }
}

fn count_value(count: usize) -> Value {
    i64::try_from(count).map_or(Value::Float(count as f64), Value::Int)
}

/// Count occurrences of each value of `column` within each severity.
///
/// Requires a severity column, normally produced by
/// [`annotate`](crate::severity::annotate). Rows where either the severity
/// or the value is null are skipped. If either column is missing a warning is
/// logged and [`SevcountError::MissingColumn`] is returned.
pub fn count(column: &str, table: &Table) -> Result<FrequencyTable> {
    let severities = require_column(table, SEVERITY_COLUMN)?;
    let values = require_column(table, column)?;

    let mut groups: BTreeMap<(&Value, &Value), usize> = BTreeMap::new();
    for (severity, value) in severities.iter().zip(values) {
        if severity.is_null() || value.is_null() {
            continue;
        }
        *groups.entry((severity, value)).or_default() += 1;
    }

    let rows = groups
        .into_iter()
        .map(|((severity, value), count)| FrequencyRow {
            severity: severity.clone(),
            value: value.clone(),
            count,
        })
        .collect();

    Ok(FrequencyTable {
        column: column.to_string(),
        rows,
    })
}

fn require_column<'a>(table: &'a Table, name: &str) -> Result<&'a [Value]> {
    table.column(name).ok_or_else(|| {
        tracing::warn!(column = name, "The column {name} is not present in the table");
        SevcountError::missing_column(name)
    })
}
