//! Annotate command - add a Severity column and write the table out.

use std::io;
use std::path::PathBuf;

use colored::Colorize;
use sevcount::{annotate, output, Parser};

use super::load_spec;
use crate::cli::OutputFormat;

pub fn run(
    file: PathBuf,
    spec: &str,
    measure: &str,
    output_path: Option<PathBuf>,
    format: OutputFormat,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let spec = load_spec(spec)?;
    let (mut table, source) = Parser::new().parse_file(&file)?;
    annotate(&spec, measure, &mut table)?;

    match output_path {
        Some(path) => {
            output::save_table(&table, &path, format.delimiter())?;
            eprintln!(
                "{} {} rows to {}",
                "Wrote".green().bold(),
                source.row_count.to_string().white().bold(),
                path.display().to_string().white()
            );
        }
        None => output::write_table(&table, io::stdout().lock(), format.delimiter())?,
    }

    if verbose {
        eprintln!("Source: {} ({}, {})", source.file, source.format, source.hash);
    }

    Ok(())
}
