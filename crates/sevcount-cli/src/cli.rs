//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sevcount: bucket scores into severities and tabulate other columns
#[derive(Parser)]
#[command(name = "sevcount")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify individual scores
    Classify {
        /// Severity spec: a JSON file or inline "Label=low:high,..."
        #[arg(short, long)]
        spec: String,

        /// Scores to classify
        #[arg(value_name = "SCORE", required = true, allow_negative_numbers = true)]
        scores: Vec<i64>,
    },

    /// Add a Severity column to a data file
    Annotate {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Severity spec: a JSON file or inline "Label=low:high,..."
        #[arg(short, long)]
        spec: String,

        /// Column holding the scores
        #[arg(short, long)]
        measure: String,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,
    },

    /// Count column values within each severity
    Count {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Severity spec: a JSON file or inline "Label=low:high,..."
        #[arg(short, long)]
        spec: String,

        /// Column holding the scores
        #[arg(short, long)]
        measure: String,

        /// Count only these columns (repeatable)
        #[arg(short, long = "column")]
        columns: Vec<String>,

        /// Leave these columns out (repeatable; default: the last column)
        #[arg(short = 'x', long, conflicts_with = "columns")]
        exclude: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Write one <column>_counts.csv per counted column into this directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
}

impl OutputFormat {
    pub fn delimiter(self) -> u8 {
        match self {
            OutputFormat::Csv => b',',
            OutputFormat::Tsv => b'\t',
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            _ => Err(format!("Unknown format: {}. Use csv or tsv.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Tsv => write!(f, "tsv"),
        }
    }
}
