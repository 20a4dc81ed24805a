//! Frequency tables of column values within severity categories.

mod batch;
mod frequency;

pub use batch::{count_all, count_all_except, count_columns, CountMapping};
pub use frequency::{count, FrequencyRow, FrequencyTable};
