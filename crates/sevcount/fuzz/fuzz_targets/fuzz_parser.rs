//! Fuzz target for the data parser and the tally pipeline.
//!
//! Parsing arbitrary bytes, then annotating and counting whatever table
//! comes out, must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sevcount::{annotate, count_all, Parser, SeveritySpec};
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(mut temp_file) = tempfile::NamedTempFile::new() {
        if temp_file.write_all(data).is_ok() {
            let Ok((mut table, _)) = Parser::new().parse_file(temp_file.path()) else {
                return;
            };

            let spec = SeveritySpec::new()
                .with_label("Low", i64::MIN, 0)
                .with_label("High", 1, i64::MAX);
            let first = table.column_names().next().map(str::to_string);
            if let Some(measure) = first {
                let _ = annotate(&spec, &measure, &mut table);
                let _ = count_all(&table);
            }
        }
    }
});
