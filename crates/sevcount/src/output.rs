//! CSV/TSV export of tables and frequency tables.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::counting::FrequencyTable;
use crate::error::{Result, SevcountError};
use crate::input::Table;

/// Write a table as delimited text with a header row.
///
/// Null cells are written as empty fields.
pub fn write_table<W: Write>(table: &Table, writer: W, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    writer.write_record(table.column_names())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write a frequency table as delimited text with a header row.
pub fn write_frequency_table<W: Write>(
    counts: &FrequencyTable,
    writer: W,
    delimiter: u8,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    writer.write_record(counts.column_names())?;
    for row in counts.rows() {
        writer.write_record([
            row.severity.to_string(),
            row.value.to_string(),
            row.count.to_string(),
        ])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Save a table to a file.
pub fn save_table(table: &Table, path: impl AsRef<Path>, delimiter: u8) -> Result<()> {
    write_table(table, create(path.as_ref())?, delimiter)
}

/// Save a frequency table to a file.
pub fn save_frequency_table(
    counts: &FrequencyTable,
    path: impl AsRef<Path>,
    delimiter: u8,
) -> Result<()> {
    write_frequency_table(counts, create(path.as_ref())?, delimiter)
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| SevcountError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
