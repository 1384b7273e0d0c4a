use tracing::debug;

use crate::error::{Error, Result};
use crate::table::Table;

use super::deserialize::materialize;
use super::options::ReadOptions;
use super::tokenizer::{Header, Tokenizer};

/// Reads delimited text into a [`Table`].
///
/// A [`Reader`] holds no reference to the source between calls; it can be reused
/// for any number of sources with the same options.
#[derive(Debug, Clone)]
pub struct Reader {
    options: ReadOptions,
    tokenizer: Tokenizer,
}

impl Reader {
    /// Creates a new [`Reader`].
    /// # Errors
    /// If the tokenizer options are invalid.
    pub fn try_new(options: ReadOptions) -> Result<Self> {
        let tokenizer = Tokenizer::new(options.tokenizer.clone())?;
        Ok(Self { options, tokenizer })
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Reads the column names of `source` and its number of columns.
    ///
    /// Without `header_start`, the number of columns is taken from the first data line
    /// and columns are named `col1..colN`. In both cases, `names` replaces the result.
    pub fn read_header(&mut self, source: &[u8]) -> Result<Header> {
        let mut header = match self.options.header_start {
            Some(line) => self.tokenizer.tokenize_header(source, line, true)?,
            None => {
                let mut header =
                    self.tokenizer
                        .tokenize_header(source, self.options.data_start, false)?;
                header.names = (1..=header.width).map(|i| format!("col{}", i)).collect();
                header
            }
        };

        if let Some(names) = &self.options.names {
            if names.len() != header.width {
                return Err(Error::InvalidArgumentError(format!(
                    "{} names were given but the table has {} columns",
                    names.len(),
                    header.width
                )));
            }
            header.names = names.clone();
        }
        Ok(header)
    }

    /// Reads `source` into a [`Table`].
    pub fn read(&mut self, source: &[u8]) -> Result<Table> {
        let header = self.read_header(source)?;
        let data = self
            .tokenizer
            .tokenize_data(source, self.options.data_start)?;
        debug!(
            width = header.width,
            num_rows = data.num_rows,
            "materializing"
        );
        materialize(
            data.columns,
            Some(header.names.as_slice()),
            data.num_rows,
            &self.options,
        )
    }
}

/// Reads `source` into a [`Table`] according to `options`.
pub fn read<S: AsRef<[u8]>>(source: S, options: &ReadOptions) -> Result<Table> {
    Reader::try_new(options.clone())?.read(source.as_ref())
}
