//! Defines [`Error`] for representing failures while tokenizing and materializing tables.
use std::fmt::{Debug, Display, Formatter};

use std::error::Error as StdError;

/// Status of a tokenizer pass. Every code other than [`ErrorCode::NoError`] aborts the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoError,
    /// The line is structurally malformed, e.g. a quoted field is never closed.
    InvalidLine,
    /// The line has more fields than the number of columns fixed by the first line.
    TooManyColumns,
}

impl ErrorCode {
    /// The human-readable description of this code.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::NoError => "no error",
            ErrorCode::InvalidLine => "invalid line",
            ErrorCode::TooManyColumns => "too many columns found in line",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// The tokenizer pass in which an error happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Header,
    Data,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Header => write!(f, "header"),
            Phase::Data => write!(f, "data"),
        }
    }
}

/// Many different operations in this crate return this error type.
#[derive(Debug)]
pub enum Error {
    /// A tokenizer pass failed on malformed input.
    Tokenize {
        phase: Phase,
        code: ErrorCode,
        /// 1-based physical line of the input
        line: usize,
        /// 0-based index of the field within the line
        field: usize,
    },
    /// A column buffer could not be decoded into the expected number of values.
    Decode { column: usize, code: ErrorCode },
    /// The configuration is inconsistent with itself or with the input.
    InvalidArgumentError(String),
    /// Field bytes are not valid for the requested representation (e.g. not utf8).
    ExternalFormat(String),
}

impl Error {
    /// The [`ErrorCode`] of this error, if it originates from tokenizing or decoding.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Error::Tokenize { code, .. } | Error::Decode { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<simdutf8::basic::Utf8Error> for Error {
    fn from(error: simdutf8::basic::Utf8Error) -> Self {
        Error::ExternalFormat(format!("field is not valid utf8: {}", error))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Tokenize {
                phase,
                code,
                line,
                field,
            } => {
                write!(
                    f,
                    "Tokenizer error ({}): {} at line {}, field {}",
                    phase, code, line, field
                )
            }
            Error::Decode { column, code } => {
                write!(f, "Decode error: {} in column {}", code, column)
            }
            Error::InvalidArgumentError(desc) => {
                write!(f, "Invalid argument error: {}", desc)
            }
            Error::ExternalFormat(desc) => {
                write!(f, "External format error: {}", desc)
            }
        }
    }
}

impl StdError for Error {}

pub type Result<T> = std::result::Result<T, Error>;
