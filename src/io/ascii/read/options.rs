#[cfg(feature = "serde_types")]
use serde_derive::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Bytes that drive the tokenizer's state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_types", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_types", serde(default))]
pub struct TokenizerOptions {
    /// Separates fields within a line
    pub delimiter: u8,
    /// A line starting with this byte is ignored. `None` disables comments.
    pub comment: Option<u8>,
    /// Encloses fields that contain delimiters or line terminators
    pub quotechar: u8,
    /// Whether to ignore spaces and tabs around unquoted fields and at the start of lines
    pub strip_whitespace: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            comment: None,
            quotechar: b'"',
            strip_whitespace: true,
        }
    }
}

impl TokenizerOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_comment(mut self, comment: Option<u8>) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_quotechar(mut self, quotechar: u8) -> Self {
        self.quotechar = quotechar;
        self
    }

    pub fn with_strip_whitespace(mut self, strip_whitespace: bool) -> Self {
        self.strip_whitespace = strip_whitespace;
        self
    }

    /// Checks that the delimiter, comment and quote bytes are distinct ASCII bytes
    /// and that none of them is a line terminator.
    pub fn validate(&self) -> Result<()> {
        let mut bytes = vec![("delimiter", self.delimiter), ("quotechar", self.quotechar)];
        if let Some(comment) = self.comment {
            bytes.push(("comment", comment));
        }
        for (name, byte) in &bytes {
            if !byte.is_ascii() {
                return Err(Error::InvalidArgumentError(format!(
                    "{} must be a single ASCII character, got byte {:#04x}",
                    name, byte
                )));
            }
            if *byte == b'\n' || *byte == b'\r' {
                return Err(Error::InvalidArgumentError(format!(
                    "{} cannot be a line terminator",
                    name
                )));
            }
        }
        for (i, (lhs_name, lhs)) in bytes.iter().enumerate() {
            if let Some((rhs_name, _)) = bytes[i + 1..].iter().find(|(_, rhs)| rhs == lhs) {
                return Err(Error::InvalidArgumentError(format!(
                    "{} and {} must differ, both are {:?}",
                    lhs_name, rhs_name, *lhs as char
                )));
            }
        }
        Ok(())
    }
}

/// A string that marks a missing value, and the string it is replaced by before
/// the column's type is inferred. Cells that matched are marked invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_types", derive(Serialize, Deserialize))]
pub struct FillValue {
    pub pattern: String,
    pub replacement: String,
    /// Columns this rule is restricted to. Empty means every column selected by
    /// `fill_include_names` and `fill_exclude_names`.
    #[cfg_attr(feature = "serde_types", serde(default))]
    pub columns: Vec<String>,
}

impl FillValue {
    pub fn new<P: Into<String>, R: Into<String>>(pattern: P, replacement: R) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            columns: vec![],
        }
    }

    /// Restricts this rule to `columns`.
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(|x| x.into()).collect();
        self
    }
}

/// Options of [`Reader`](super::Reader).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_types", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_types", serde(default))]
pub struct ReadOptions {
    pub tokenizer: TokenizerOptions,
    /// Significant line holding the column names. `None` derives the number of
    /// columns from the first data line and names them `col1..colN`.
    pub header_start: Option<usize>,
    /// Significant line where data starts
    pub data_start: usize,
    /// Names overriding those of the header
    pub names: Option<Vec<String>>,
    pub include_names: Option<Vec<String>>,
    pub exclude_names: Option<Vec<String>>,
    pub fill_values: Vec<FillValue>,
    pub fill_include_names: Option<Vec<String>>,
    pub fill_exclude_names: Option<Vec<String>>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerOptions::default(),
            header_start: Some(0),
            data_start: 1,
            names: None,
            include_names: None,
            exclude_names: None,
            fill_values: vec![FillValue::new("", "0")],
            fill_include_names: None,
            fill_exclude_names: None,
        }
    }
}

fn to_strings<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(|x| x.into()).collect()
}

impl ReadOptions {
    pub fn with_tokenizer(mut self, tokenizer: TokenizerOptions) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.tokenizer.delimiter = delimiter;
        self
    }

    pub fn with_comment(mut self, comment: Option<u8>) -> Self {
        self.tokenizer.comment = comment;
        self
    }

    pub fn with_quotechar(mut self, quotechar: u8) -> Self {
        self.tokenizer.quotechar = quotechar;
        self
    }

    pub fn with_header_start(mut self, header_start: Option<usize>) -> Self {
        self.header_start = header_start;
        self
    }

    pub fn with_data_start(mut self, data_start: usize) -> Self {
        self.data_start = data_start;
        self
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = Some(to_strings(names));
        self
    }

    pub fn with_include_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_names = Some(to_strings(names));
        self
    }

    pub fn with_exclude_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_names = Some(to_strings(names));
        self
    }

    pub fn with_fill_values(mut self, fill_values: Vec<FillValue>) -> Self {
        self.fill_values = fill_values;
        self
    }

    pub fn with_fill_include_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fill_include_names = Some(to_strings(names));
        self
    }

    pub fn with_fill_exclude_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fill_exclude_names = Some(to_strings(names));
        self
    }
}
