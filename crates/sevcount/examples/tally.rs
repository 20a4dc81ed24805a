//! Example: Tally a data file by severity.
//!
//! Usage:
//!   cargo run --example tally -- <file_path> <measure> [spec]
//!
//! Example:
//!   cargo run --example tally -- survey.csv phq9 "Minimal=0:4,Mild=5:9,Moderate=10:14,Severe=15:27"

use std::env;
use std::path::Path;

use sevcount::{SeveritySpec, SeverityTally};

fn main() -> sevcount::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: cargo run --example tally -- <file_path> <measure> [spec]");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let spec: SeveritySpec = args
        .get(3)
        .map(String::as_str)
        .unwrap_or("Small=0:9,Medium=10:19,Large=20:39")
        .parse()?;

    let result = SeverityTally::new()
        .with_measure(&args[2])
        .run(path, &spec)?;

    let separator = "=".repeat(60);
    println!("{}", separator);
    println!("Severity tally: {} ({} rows)", result.source.file, result.source.row_count);
    println!("{}", separator);

    for (label, n) in &result.report.severity_counts {
        println!("  {:24} {}", label, n);
    }

    for (column, counts) in &result.report.tables {
        println!();
        println!("{} ({} groups)", column, counts.len());
        for row in counts.rows() {
            println!("  {:24} {:24} {}", row.severity.to_string(), row.value.to_string(), row.count);
        }
    }

    for (column, reason) in &result.report.skipped {
        println!("Skipped {}: {}", column, reason);
    }

    Ok(())
}
