//! Count command - frequency tables of each column within each severity.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use sevcount::{output, ColumnSelection, FrequencyTable, SeverityTally, TallyConfig, OUT_OF_RANGE};

use super::load_spec;

/// Arguments for the count command.
pub struct CountArgs {
    pub file: PathBuf,
    pub spec: String,
    pub measure: String,
    pub columns: Vec<String>,
    pub exclude: Vec<String>,
    pub json: bool,
    pub output_dir: Option<PathBuf>,
}

impl CountArgs {
    fn selection(&self) -> ColumnSelection {
        if !self.columns.is_empty() {
            ColumnSelection::Only(self.columns.clone())
        } else if !self.exclude.is_empty() {
            ColumnSelection::Except(self.exclude.clone())
        } else {
            ColumnSelection::AllButLast
        }
    }
}

pub fn run(args: CountArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let spec = load_spec(&args.spec)?;
    let tally = SeverityTally::with_config(TallyConfig {
        measure: args.measure.clone(),
        columns: args.selection(),
        ..TallyConfig::default()
    });
    let result = tally.run(&args.file, &spec)?;
    let report = &result.report;

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
        let names = count_file_names(report.tables.keys().map(String::as_str));
        for ((_, counts), name) in report.tables.iter().zip(names) {
            let path = dir.join(name);
            output::save_frequency_table(counts, &path, b',')?;
            if verbose {
                eprintln!("{} {}", "Saved".green(), path.display());
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows, measure {})",
        "Counted".cyan().bold(),
        result.source.file.white(),
        result.source.row_count.to_string().white().bold(),
        report.measure.white().bold()
    );
    println!();

    println!("{}", "Severity distribution:".yellow().bold());
    for (label, n) in &report.severity_counts {
        let label = if label == OUT_OF_RANGE {
            label.dimmed()
        } else {
            label.normal()
        };
        println!("  {:24} {}", label, n);
    }

    for (column, counts) in &report.tables {
        println!();
        print_frequency_table(column, counts);
    }

    for (column, reason) in &report.skipped {
        println!();
        println!("{} {}: {}", "Skipped".yellow().bold(), column, reason);
    }

    if let Some(dir) = &args.output_dir {
        println!();
        println!(
            "{} {} tables to {}",
            "Saved".green().bold(),
            report.tables.len().to_string().white().bold(),
            dir.display().to_string().white()
        );
    }

    Ok(())
}

fn print_frequency_table(column: &str, counts: &FrequencyTable) {
    let [severity, value, count] = counts.column_names();
    println!("{}", column.cyan().bold());
    println!("  {:24} {:24} {}", severity.bold(), value.bold(), count.bold());
    for row in counts.rows() {
        println!(
            "  {:24} {:24} {}",
            row.severity.to_string(),
            row.value.to_string(),
            row.count
        );
    }
}

/// Make a column name safe to use in a file name.
fn file_stem(column: &str) -> String {
    column
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// One `<column>_counts.csv` file name per column. Names that collide after
/// sanitizing, ignoring case, get a `_2`, `_3`, ... suffix in column order.
fn count_file_names<'a>(columns: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut taken = HashSet::new();
    columns
        .into_iter()
        .map(|column| {
            let stem = file_stem(column);
            let mut name = format!("{stem}_counts.csv");
            let mut n = 1;
            while !taken.insert(name.to_lowercase()) {
                n += 1;
                name = format!("{stem}_{n}_counts.csv");
            }
            name
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CountArgs {
        CountArgs {
            file: PathBuf::from("data.csv"),
            spec: "A=0:1".to_string(),
            measure: "score".to_string(),
            columns: Vec::new(),
            exclude: Vec::new(),
            json: false,
            output_dir: None,
        }
    }

    #[test]
    fn test_selection() {
        assert_eq!(args().selection(), ColumnSelection::AllButLast);

        let mut only = args();
        only.columns = vec!["Day".to_string()];
        assert_eq!(only.selection(), ColumnSelection::Only(vec!["Day".to_string()]));

        let mut except = args();
        except.exclude = vec!["id".to_string()];
        assert_eq!(except.selection(), ColumnSelection::Except(vec!["id".to_string()]));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("Week"), "Week");
        assert_eq!(file_stem("age group/years"), "age_group_years");
    }

    #[test]
    fn test_count_file_names_disambiguate_collisions() {
        assert_eq!(
            count_file_names(["a b", "a/b", "Week", "a_b", "WEEK"]),
            vec![
                "a_b_counts.csv",
                "a_b_2_counts.csv",
                "Week_counts.csv",
                "a_b_3_counts.csv",
                "WEEK_2_counts.csv",
            ]
        );
    }

    #[test]
    fn test_run_keeps_colliding_columns_apart() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.csv");
        fs::write(&data, "a b,a/b,score\nx,p,1\ny,q,0\n").unwrap();
        let out = dir.path().join("counts");

        let mut run_args = args();
        run_args.file = data;
        run_args.columns = vec!["a b".to_string(), "a/b".to_string()];
        run_args.output_dir = Some(out.clone());
        run(run_args, false).unwrap();

        let first = fs::read_to_string(out.join("a_b_counts.csv")).unwrap();
        let second = fs::read_to_string(out.join("a_b_2_counts.csv")).unwrap();
        assert_eq!(first, "Severity,a b,a b Count\nA,x,1\nA,y,1\n");
        assert_eq!(second, "Severity,a/b,a/b Count\nA,p,1\nA,q,1\n");
    }

    #[test]
    fn test_run_writes_count_files() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.csv");
        fs::write(&data, "Day,score\nMon,1\nTue,0\nMon,1\n").unwrap();
        let out = dir.path().join("counts");

        let mut run_args = args();
        run_args.file = data;
        run_args.columns = vec!["Day".to_string()];
        run_args.output_dir = Some(out.clone());
        run(run_args, false).unwrap();

        let written = fs::read_to_string(out.join("Day_counts.csv")).unwrap();
        assert_eq!(written, "Severity,Day,Day Count\nA,Mon,2\nA,Tue,1\n");
    }

    #[test]
    fn test_run_missing_file() {
        let err = run(args(), false).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
