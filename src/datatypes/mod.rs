//! Column types that a table can be materialized into, and the rules to infer them.
#[cfg(feature = "serde_types")]
use serde_derive::{Deserialize, Serialize};

/// The set of datatypes a column can be inferred as.
///
/// The variants are ordered from narrowest to widest: every value that is a valid
/// [`DataType::Int64`] is a valid [`DataType::Float64`], and every value is a valid
/// [`DataType::Utf8`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde_types", derive(Serialize, Deserialize))]
pub enum DataType {
    /// A signed 64-bit integer.
    Int64,
    /// A 64-bit floating point number.
    Float64,
    /// A variable-length string in Unicode with UTF-8 encoding.
    Utf8,
}

/// The candidates tried, in order, when inferring the type of a column.
pub const CANDIDATES: [DataType; 3] = [DataType::Int64, DataType::Float64, DataType::Utf8];

fn is_integer(bytes: &[u8]) -> bool {
    lexical_core::parse::<i64>(bytes).is_ok()
}

fn is_float(bytes: &[u8]) -> bool {
    lexical_core::parse::<f64>(bytes).is_ok()
}

impl DataType {
    /// Whether `bytes` can be represented by this type.
    /// # Implementation
    /// * [`DataType::Int64`]: parsable to `i64` (overflows are not)
    /// * [`DataType::Float64`]: parsable to `f64`
    /// * [`DataType::Utf8`]: always; utf8 validity is checked when the column is built
    #[inline]
    pub fn validates(&self, bytes: &[u8]) -> bool {
        match self {
            DataType::Int64 => is_integer(bytes),
            DataType::Float64 => is_float(bytes),
            DataType::Utf8 => true,
        }
    }

    /// Infers the narrowest [`DataType`] among [`CANDIDATES`] that validates every value.
    /// An empty sequence of values is [`DataType::Int64`].
    pub fn infer<'a, I>(values: I) -> DataType
    where
        I: IntoIterator<Item = &'a [u8]>,
        I::IntoIter: Clone,
    {
        let values = values.into_iter();
        CANDIDATES
            .iter()
            .copied()
            .find(|candidate| values.clone().all(|value| candidate.validates(value)))
            .unwrap_or(DataType::Utf8)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
