//! Tokenizes delimited text and materializes it into typed columns.
mod buffer;
mod deserialize;
mod fill;
mod options;
mod reader;
mod tokenizer;

pub use buffer::ColumnBuffer;
pub use deserialize::{deserialize_column, materialize};
pub use fill::{resolve as resolve_fill_values, FillRules};
pub use options::{FillValue, ReadOptions, TokenizerOptions};
pub use reader::*;
pub use tokenizer::{Header, TokenizedData, Tokenizer};
