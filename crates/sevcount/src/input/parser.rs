//! CSV/TSV parser with delimiter detection.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{format_name, SourceMetadata};
use super::table::Table;
use super::value::Value;
use crate::error::{Result, SevcountError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Non-blank lines inspected by delimiter detection.
const SAMPLE_LINES: usize = 10;

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses delimited text into typed tables.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the table and its metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| SevcountError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = self.resolve_delimiter(&contents)?;
        let table = self.parse_bytes(&contents, delimiter)?;

        tracing::debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "parsed data file"
        );

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format_name(delimiter).to_string(),
            table.row_count(),
            table.column_count(),
        );

        Ok((table, source))
    }

    /// Parse in-memory delimited text.
    pub fn parse_str(&self, text: &str) -> Result<Table> {
        let delimiter = self.resolve_delimiter(text.as_bytes())?;
        self.parse_bytes(text.as_bytes(), delimiter)
    }

    fn resolve_delimiter(&self, bytes: &[u8]) -> Result<u8> {
        match self.config.delimiter {
            Some(d) => Ok(d),
            None => detect_delimiter(bytes, self.config.quote),
        }
    }

    /// Parse bytes directly.
    fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        };

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if self.config.max_rows.is_some_and(|max| row_idx >= max) {
                break;
            }

            let record = result?;
            if headers.is_empty() && !self.config.has_header {
                headers = (0..record.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect();
            }
            rows.push(record.iter().map(Value::parse).collect::<Vec<_>>());
        }

        if headers.is_empty() {
            return Err(SevcountError::EmptyData("No columns found".to_string()));
        }
        if rows.is_empty() {
            return Err(SevcountError::EmptyData("No data rows found".to_string()));
        }

        Ok(Table::from_rows(dedupe_headers(headers), rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Suffix repeated header names (`a`, `a.1`, `a.2`) so every column keeps its own name.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut unique = Vec::with_capacity(headers.len());

    for header in headers {
        let mut name = header.clone();
        while let Some(n) = seen.get_mut(&name) {
            *n += 1;
            name = format!("{}.{}", header, n);
        }
        seen.insert(name.clone(), 0);
        unique.push(name);
    }

    unique
}

/// Pick the delimiter that splits the leading lines most evenly.
///
/// A candidate must occur on the first line. One that occurs equally often on
/// every sampled line outranks one that does not; then more fields win, then
/// tab, then the earlier entry of [`DELIMITERS`].
fn detect_delimiter(bytes: &[u8], quote: u8) -> Result<u8> {
    let sample: Vec<&[u8]> = bytes
        .split(|&b| b == b'\n')
        .filter(|line| !line.trim_ascii().is_empty())
        .take(SAMPLE_LINES)
        .collect();
    let Some(first) = sample.first() else {
        return Err(SevcountError::EmptyData("No lines to analyze".to_string()));
    };

    let best = DELIMITERS
        .iter()
        .rev()
        .filter_map(|&delim| {
            let splits = unquoted_count(first, delim, quote);
            if splits == 0 {
                return None;
            }
            let uniform = sample
                .iter()
                .all(|line| unquoted_count(line, delim, quote) == splits);
            Some(((uniform, splits, delim == b'\t'), delim))
        })
        .max_by_key(|(rank, _)| *rank)
        .map_or(b',', |(_, delim)| delim);

    Ok(best)
}

/// Occurrences of `delimiter` outside quoted sections of a line.
fn unquoted_count(line: &[u8], delimiter: u8, quote: u8) -> usize {
    line.iter()
        .scan(false, |quoted, &b| {
            if b == quote {
                *quoted = !*quoted;
            }
            Some(!*quoted && b == delimiter)
        })
        .filter(|&hit| hit)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data, b'"').unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data, b'"').unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted() {
        let data = b"name;note\n\"Smith, J\";x\n\"Doe, A\";y";
        assert_eq!(detect_delimiter(data, b'"').unwrap(), b';');
    }

    #[test]
    fn test_detect_delimiter_prefers_uniform_split() {
        // Commas outnumber semicolons on the first line but vary per row.
        let data = b"a,b,c;d\n1;2\n3,4;5";
        assert_eq!(detect_delimiter(data, b'"').unwrap(), b';');
    }

    #[test]
    fn test_detect_delimiter_defaults_to_comma() {
        assert_eq!(detect_delimiter(b"single\nvalue", b'"').unwrap(), b',');
        assert!(detect_delimiter(b"\n  \n", b'"').is_err());
    }

    #[test]
    fn test_parse_typed_cells() {
        let parser = Parser::new();
        let table = parser
            .parse_str("Day,Week,score\nMon,1,4\nTues,NA,10.5\n")
            .unwrap();

        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["Day", "Week", "score"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, "Day"), Some(&Value::from("Mon")));
        assert_eq!(table.get(0, "Week"), Some(&Value::Int(1)));
        assert_eq!(table.get(1, "Week"), Some(&Value::Null));
        assert_eq!(table.get(1, "score"), Some(&Value::Float(10.5)));
    }

    #[test]
    fn test_parse_without_header() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..ParserConfig::default()
        });
        let table = parser.parse_str("a,1\nb,2\n").unwrap();
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["column_1", "column_2"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_parse_max_rows() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(1),
            ..ParserConfig::default()
        });
        let table = parser.parse_str("x,y\n1,2\n3,4\n").unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_duplicate_headers_kept_apart() {
        let table = Parser::new().parse_str("a,a,b\n1,2,3\n").unwrap();
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["a", "a.1", "b"]);
        assert_eq!(table.get(0, "a.1"), Some(&Value::Int(2)));
        assert_eq!(table.get(0, "b"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_parse_header_only_is_empty() {
        let err = Parser::new().parse_str("x,y\n").unwrap_err();
        assert!(matches!(err, SevcountError::EmptyData(_)));
    }

    #[test]
    fn test_parse_empty_input() {
        let err = Parser::new().parse_str("").unwrap_err();
        assert!(matches!(err, SevcountError::EmptyData(_)));
    }
}
