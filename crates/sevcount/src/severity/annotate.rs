//! Adds a severity column to a table.

use super::spec::{classify_value, SeveritySpec};
use crate::error::{Result, SevcountError};
use crate::input::{Table, Value};

/// Name of the column written by [`annotate`].
pub const SEVERITY_COLUMN: &str = "Severity";

/// Classify every value of `measure` and store the labels in a
/// [`SEVERITY_COLUMN`] column.
///
/// An existing severity column is overwritten in place, so re-running with
/// the same inputs yields the same column. If `measure` is not in the table
/// a warning is logged, the table is left untouched and
/// [`SevcountError::MissingColumn`] is returned.
pub fn annotate(spec: &SeveritySpec, measure: &str, table: &mut Table) -> Result<()> {
    let Some(scores) = table.column(measure) else {
        tracing::warn!(column = measure, "The column {measure} is not present in the table");
        return Err(SevcountError::missing_column(measure));
    };

    let labels: Vec<Value> = scores
        .iter()
        .map(|score| Value::from(classify_value(score, spec)))
        .collect();

    tracing::debug!(column = measure, rows = labels.len(), "annotated severity");
    table.set_column(SEVERITY_COLUMN, labels)
}
