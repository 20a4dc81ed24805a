//! Frequency tables for every column of a table.

use indexmap::IndexMap;

use super::frequency::{count, FrequencyTable};
use crate::error::Result;
use crate::input::Table;

/// Outcome of counting each column, keyed by column name in table order.
///
/// A column whose count failed keeps its entry, holding the error.
#[derive(Debug, Default)]
pub struct CountMapping {
    entries: IndexMap<String, Result<FrequencyTable>>,
}

impl CountMapping {
    /// Column names in table order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Outcome for one column.
    pub fn get(&self, column: &str) -> Option<&Result<FrequencyTable>> {
        self.entries.get(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Result<FrequencyTable>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Successfully counted columns.
    pub fn tables(&self) -> impl Iterator<Item = (&str, &FrequencyTable)> {
        self.iter()
            .filter_map(|(k, v)| v.as_ref().ok().map(|table| (k, table)))
    }

    /// Columns whose count failed, with the error.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &crate::SevcountError)> {
        self.iter().filter_map(|(k, v)| v.as_ref().err().map(|e| (k, e)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop failed entries and keep the frequency tables.
    pub fn into_tables(self) -> IndexMap<String, FrequencyTable> {
        self.entries
            .into_iter()
            .filter_map(|(k, v)| v.ok().map(|table| (k, table)))
            .collect()
    }
}

/// Count every column except the last one.
///
/// After [`annotate`](crate::severity::annotate) the last column is normally
/// the severity column itself. Use [`count_all_except`] to name the excluded
/// columns explicitly.
pub fn count_all(table: &Table) -> CountMapping {
    match table.last_column_name() {
        Some(last) => count_all_except(table, &[last]),
        None => CountMapping::default(),
    }
}

/// Count every column not listed in `excluded`, in table order.
pub fn count_all_except(table: &Table, excluded: &[&str]) -> CountMapping {
    count_columns(table, table.column_names().filter(|name| !excluded.contains(name)))
}

/// Count the given columns, in the order given.
pub fn count_columns<'a>(table: &Table, columns: impl IntoIterator<Item = &'a str>) -> CountMapping {
    let entries = columns
        .into_iter()
        .map(|column| (column.to_string(), count(column, table)))
        .collect();
    CountMapping { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Value;
    use crate::severity::{annotate, SeveritySpec, SEVERITY_COLUMN};
    use crate::SevcountError;

    fn week_table() -> Table {
        let mut table = Table::new()
            .with_column("Day", ["Mon", "Tues", "Fri", "Thurs", "Fri", "Mon"])
            .unwrap()
            .with_column("Week", [1, 2, 3, 4, 5, 6])
            .unwrap()
            .with_column("score", [4, 10, 15, 25, 13, 20])
            .unwrap();
        let spec = SeveritySpec::new()
            .with_label("Small", 0, 9)
            .with_label("Medium", 10, 19)
            .with_label("Large", 20, 39);
        annotate(&spec, "score", &mut table).unwrap();
        table
    }

    #[test]
    fn test_count_all_skips_last_column() {
        let mapping = count_all(&week_table());

        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["Day", "Week", "score"]);
        let week = mapping.get("Week").unwrap().as_ref().unwrap();
        assert_eq!(week.count_column(), "Week Count");
        assert_eq!(week.len(), 6);
        assert_eq!(mapping.failures().count(), 0);
    }

    #[test]
    fn test_count_all_except_explicit() {
        let table = week_table();
        let mapping = count_all_except(&table, &["score", SEVERITY_COLUMN]);
        assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["Day", "Week"]);
    }

    #[test]
    fn test_count_all_without_severity_records_failures() {
        let table = Table::new()
            .with_column("Day", ["Mon", "Tues"])
            .unwrap()
            .with_column("score", [1, 2])
            .unwrap();
        let mapping = count_all(&table);

        assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["Day"]);
        assert!(matches!(
            mapping.get("Day"),
            Some(Err(SevcountError::MissingColumn { .. }))
        ));
        assert_eq!(mapping.tables().count(), 0);
    }

    #[test]
    fn test_count_all_empty_table() {
        assert!(count_all(&Table::new()).is_empty());
    }

    #[test]
    fn test_into_tables() {
        let tables = count_all(&week_table()).into_tables();
        assert_eq!(tables.len(), 3);
        assert_eq!(
            tables["score"].count_for(&Value::from("Large"), &Value::Int(25)),
            Some(1)
        );
    }

    #[test]
    fn test_count_columns_order() {
        let table = week_table();
        let mapping = count_columns(&table, ["Week", "Missing", "Day"]);
        assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["Week", "Missing", "Day"]);
        assert_eq!(mapping.failures().map(|(k, _)| k).collect::<Vec<_>>(), vec!["Missing"]);
    }
}
