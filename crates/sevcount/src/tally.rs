//! Main SeverityTally struct: load, annotate and count in one call.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::counting::{count_all, count_all_except, count_columns, FrequencyTable};
use crate::error::{Result, SevcountError};
use crate::input::{Parser, ParserConfig, SourceMetadata, Table};
use crate::severity::{annotate, SeveritySpec, OUT_OF_RANGE, SEVERITY_COLUMN};

/// Which columns are counted after annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSelection {
    /// Every column but the last one (the severity column).
    #[default]
    AllButLast,
    /// Every column not named here.
    Except(Vec<String>),
    /// Only the named columns, in the order given.
    Only(Vec<String>),
}

/// Configuration for a tally run.
#[derive(Debug, Clone)]
pub struct TallyConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Column holding the scores to classify.
    pub measure: String,
    /// Columns to count.
    pub columns: ColumnSelection,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            measure: "score".to_string(),
            columns: ColumnSelection::default(),
        }
    }
}

/// Counts for an annotated table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TallyReport {
    /// The classified column.
    pub measure: String,
    /// Rows per severity label, in spec order with the out-of-range label last.
    pub severity_counts: IndexMap<String, usize>,
    /// Frequency tables of the counted columns.
    pub tables: IndexMap<String, FrequencyTable>,
    /// Columns that could not be counted, with the reason.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub skipped: IndexMap<String, String>,
}

/// Result of tallying a data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TallyResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// The spec used for classification.
    pub spec: SeveritySpec,
    /// The table with its severity column.
    #[serde(skip)]
    pub table: Table,
    /// Counts.
    pub report: TallyReport,
}

/// Runs the classify → annotate → count pipeline.
pub struct SeverityTally {
    config: TallyConfig,
    parser: Parser,
}

impl SeverityTally {
    /// Create a tally with default configuration.
    pub fn new() -> Self {
        Self::with_config(TallyConfig::default())
    }

    /// Create a tally with custom configuration.
    pub fn with_config(config: TallyConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    /// Set the measure column.
    pub fn with_measure(mut self, measure: impl Into<String>) -> Self {
        self.config.measure = measure.into();
        self
    }

    /// Set which columns are counted.
    pub fn with_columns(mut self, columns: ColumnSelection) -> Self {
        self.config.columns = columns;
        self
    }

    pub fn config(&self) -> &TallyConfig {
        &self.config
    }

    /// Load a data file, annotate it and count every column.
    pub fn run(&self, path: impl AsRef<Path>, spec: &SeveritySpec) -> Result<TallyResult> {
        let (mut table, source) = self.parser.parse_file(path)?;
        let report = self.run_table(&mut table, spec)?;

        tracing::info!(
            file = %source.file,
            rows = source.row_count,
            tables = report.tables.len(),
            skipped = report.skipped.len(),
            "tally complete"
        );

        Ok(TallyResult {
            source,
            spec: spec.clone(),
            table,
            report,
        })
    }

    /// Annotate an in-memory table and count every column.
    ///
    /// A missing measure column is an error here, since nothing can be
    /// counted without severities.
    pub fn run_table(&self, table: &mut Table, spec: &SeveritySpec) -> Result<TallyReport> {
        annotate(spec, &self.config.measure, table)?;

        let mapping = match &self.config.columns {
            ColumnSelection::AllButLast => count_all(table),
            ColumnSelection::Except(names) => {
                let excluded: Vec<&str> = names.iter().map(String::as_str).collect();
                count_all_except(table, &excluded)
            }
            ColumnSelection::Only(names) => count_columns(table, names.iter().map(String::as_str)),
        };

        let skipped = mapping
            .failures()
            .map(|(column, err)| (column.to_string(), err.to_string()))
            .collect();

        Ok(TallyReport {
            measure: self.config.measure.clone(),
            severity_counts: severity_counts(table, spec)?,
            tables: mapping.into_tables(),
            skipped,
        })
    }
}

impl Default for SeverityTally {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows per label, zero counts included.
fn severity_counts(table: &Table, spec: &SeveritySpec) -> Result<IndexMap<String, usize>> {
    let mut counts: IndexMap<String, usize> = spec
        .labels()
        .chain(std::iter::once(OUT_OF_RANGE))
        .map(|label| (label.to_string(), 0))
        .collect();

    let severities = table
        .column(SEVERITY_COLUMN)
        .ok_or_else(|| SevcountError::missing_column(SEVERITY_COLUMN))?;
    for label in severities.iter().filter_map(|v| v.as_text()) {
        if let Some(n) = counts.get_mut(label) {
            *n += 1;
        }
    }

    Ok(counts)
}
