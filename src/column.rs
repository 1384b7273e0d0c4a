//! Contains [`TypedColumn`], a named, homogeneously typed sequence of values.
use crate::datatypes::DataType;

/// The values of a [`TypedColumn`].
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    Int64(Vec<i64>),
    Float64(Vec<f64>),
    Utf8(Vec<String>),
}

impl Values {
    pub fn data_type(&self) -> DataType {
        match self {
            Values::Int64(_) => DataType::Int64,
            Values::Float64(_) => DataType::Float64,
            Values::Utf8(_) => DataType::Utf8,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Values::Int64(values) => values.len(),
            Values::Float64(values) => values.len(),
            Values::Utf8(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A column of a [`Table`](crate::table::Table).
///
/// `validity`, when present, has one entry per value: `false` marks a value that was
/// replaced by a fill value, i.e. a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedColumn {
    name: String,
    values: Values,
    validity: Option<Vec<bool>>,
}

impl TypedColumn {
    /// Creates a new [`TypedColumn`].
    /// # Panics
    /// If `validity` is present and its length differs from the number of values.
    pub fn new(name: String, values: Values, validity: Option<Vec<bool>>) -> Self {
        if let Some(validity) = &validity {
            assert_eq!(
                validity.len(),
                values.len(),
                "validity must be as long as the values"
            );
        }
        Self {
            name,
            values,
            validity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.values.data_type()
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn into_values(self) -> Values {
        self.values
    }

    pub fn validity(&self) -> Option<&[bool]> {
        self.validity.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the value at `index` is missing.
    #[inline]
    pub fn is_null(&self, index: usize) -> bool {
        self.validity
            .as_ref()
            .map(|x| !x[index])
            .unwrap_or(false)
    }

    pub fn null_count(&self) -> usize {
        self.validity
            .as_ref()
            .map(|x| x.iter().filter(|x| !**x).count())
            .unwrap_or(0)
    }

    pub fn as_i64(&self) -> Option<&[i64]> {
        match &self.values {
            Values::Int64(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<&[f64]> {
        match &self.values {
            Values::Float64(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn as_utf8(&self) -> Option<&[String]> {
        match &self.values {
            Values::Utf8(values) => Some(values.as_slice()),
            _ => None,
        }
    }
}
