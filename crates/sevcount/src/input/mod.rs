//! Tabular data model and input parsing.

mod parser;
mod source;
mod table;
mod value;

pub use parser::{Parser, ParserConfig};
pub use source::SourceMetadata;
pub use table::Table;
pub use value::{is_null_value, Value};
