//! sevcount: severity bucketing and frequency tables for tabular data.
//!
//! Numeric scores are classified into user-defined severity categories, and
//! every other column is then tabulated within each category.
//!
//! # Core operations
//!
//! - [`classify`]: map a score to the label of the range containing it
//! - [`annotate`]: add a `Severity` column to a table
//! - [`count`]: count each (severity, value) pair of one column
//! - [`count_all`]: count every column except the last one
//!
//! # Example
//!
//! ```
//! use sevcount::{annotate, count_all, SeveritySpec, Table};
//!
//! let spec: SeveritySpec = "Small=0:9,Medium=10:19,Large=20:39".parse().unwrap();
//! let mut table = Table::new()
//!     .with_column("Day", ["Mon", "Tues", "Fri"]).unwrap()
//!     .with_column("score", [4, 10, 15]).unwrap();
//!
//! annotate(&spec, "score", &mut table).unwrap();
//! let counts = count_all(&table);
//!
//! assert_eq!(counts.keys().collect::<Vec<_>>(), vec!["Day", "score"]);
//! ```

pub mod counting;
pub mod error;
pub mod input;
pub mod output;
pub mod severity;

mod tally;

#[cfg(test)]
mod testing;

pub use crate::tally::{ColumnSelection, SeverityTally, TallyConfig, TallyReport, TallyResult};
pub use counting::{
    count, count_all, count_all_except, count_columns, CountMapping, FrequencyRow, FrequencyTable,
};
pub use error::{Result, SevcountError};
pub use input::{Parser, ParserConfig, SourceMetadata, Table, Value};
pub use severity::{
    annotate, classify, classify_value, ScoreRange, SeveritySpec, OUT_OF_RANGE, SEVERITY_COLUMN,
};
