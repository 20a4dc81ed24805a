//! Score classification into user-defined severity categories.

mod annotate;
mod spec;

pub use annotate::{annotate, SEVERITY_COLUMN};
pub use spec::{classify, classify_value, ScoreRange, SeveritySpec, OUT_OF_RANGE};
