use tracing::debug;

use crate::error::{Error, ErrorCode, Phase, Result};

use super::buffer::ColumnBuffer;
use super::options::TokenizerOptions;

/// The state of the scanner at the current byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    StartLine,
    StartField,
    Field,
    QuotedField,
    /// A quote was found inside a quoted field: either it closes the field or it is doubled.
    QuoteInQuotedField,
    Comment,
}

/// Column names and number of columns, as found by [`Tokenizer::tokenize_header`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// The names of the columns; empty when the header line was only used to count columns
    pub names: Vec<String>,
    pub width: usize,
}

/// The fields of the data region, one [`ColumnBuffer`] per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedData {
    pub columns: Vec<ColumnBuffer>,
    pub num_rows: usize,
}

/// A single pass over a source buffer.
struct Scan<'a> {
    options: &'a TokenizerOptions,
    source: &'a [u8],
    phase: Phase,
    pos: usize,
    /// 1-based physical line
    line: usize,
    /// significant lines still to skip before rows are recorded
    skip: usize,
    max_rows: Option<usize>,
    num_cols: Option<usize>,
    columns: Vec<ColumnBuffer>,
    /// index of the current field within the current line
    field: usize,
    num_rows: usize,
    /// bytes of the pending field that come from a quoted section and are never stripped
    quoted_len: usize,
}

#[inline]
fn is_newline(c: u8) -> bool {
    c == b'\n' || c == b'\r'
}

#[inline]
fn is_whitespace(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

impl<'a> Scan<'a> {
    fn new(
        options: &'a TokenizerOptions,
        source: &'a [u8],
        phase: Phase,
        skip: usize,
        max_rows: Option<usize>,
        num_cols: Option<usize>,
    ) -> Self {
        let columns = num_cols
            .map(|n| vec![ColumnBuffer::new(); n])
            .unwrap_or_default();
        Self {
            options,
            source,
            phase,
            pos: 0,
            line: 1,
            skip,
            max_rows,
            num_cols,
            columns,
            field: 0,
            num_rows: 0,
            quoted_len: 0,
        }
    }

    fn error(&self, code: ErrorCode) -> Error {
        Error::Tokenize {
            phase: self.phase,
            code,
            line: self.line,
            field: self.field,
        }
    }

    #[inline]
    fn skipping(&self) -> bool {
        self.skip > 0
    }

    #[inline]
    fn is_done(&self) -> bool {
        self.max_rows.map(|max| self.num_rows >= max).unwrap_or(false)
    }

    /// Whether trailing whitespace before a line terminator ends the line instead of
    /// separating an extra, empty field.
    #[inline]
    fn whitespace_delimited(&self) -> bool {
        self.options.strip_whitespace && is_whitespace(self.options.delimiter)
    }

    fn consume_newline(&mut self, c: u8) {
        self.pos += 1;
        if c == b'\r' && self.source.get(self.pos) == Some(&b'\n') {
            self.pos += 1;
        }
        self.line += 1;
    }

    /// Prepares the column of the current field.
    fn start_field(&mut self) -> Result<()> {
        if self.skipping() {
            return Ok(());
        }
        self.quoted_len = 0;
        match self.num_cols {
            Some(num_cols) if self.field >= num_cols => Err(self.error(ErrorCode::TooManyColumns)),
            Some(_) => Ok(()),
            None => {
                if self.field == self.columns.len() {
                    self.columns.push(ColumnBuffer::new());
                }
                Ok(())
            }
        }
    }

    #[inline]
    fn push_byte(&mut self, c: u8) {
        if !self.skipping() {
            self.columns[self.field].push_byte(c);
        }
    }

    fn mark_quoted(&mut self) {
        if !self.skipping() {
            self.quoted_len = self.columns[self.field].pending_len();
        }
    }

    fn end_field(&mut self) {
        if !self.skipping() {
            let column = &mut self.columns[self.field];
            if self.options.strip_whitespace {
                let pending = column.pending();
                let mut len = pending.len();
                while len > self.quoted_len && is_whitespace(pending[len - 1]) {
                    len -= 1;
                }
                column.truncate_pending(len);
            }
            column.end_field();
        }
        self.field += 1;
    }

    fn empty_field(&mut self) -> Result<()> {
        self.start_field()?;
        self.end_field();
        Ok(())
    }

    fn end_row(&mut self) {
        if self.skipping() {
            self.skip -= 1;
            self.field = 0;
            return;
        }
        let num_cols = *self.num_cols.get_or_insert(self.field);
        // short rows are padded with empty fields
        for column in self.columns[self.field..num_cols].iter_mut() {
            column.push(b"");
        }
        self.num_rows += 1;
        self.field = 0;
    }

    fn run(&mut self) -> Result<()> {
        let TokenizerOptions {
            delimiter,
            comment,
            quotechar,
            strip_whitespace,
        } = *self.options;

        let mut state = State::StartLine;
        while self.pos < self.source.len() && !self.is_done() {
            let c = self.source[self.pos];
            match state {
                State::StartLine => {
                    if Some(c) == comment {
                        state = State::Comment;
                        self.pos += 1;
                    } else if is_newline(c) {
                        // blank lines are not significant
                        self.consume_newline(c);
                    } else if strip_whitespace && is_whitespace(c) {
                        self.pos += 1;
                    } else {
                        state = State::StartField;
                    }
                }
                State::StartField => {
                    if c == quotechar {
                        self.start_field()?;
                        state = State::QuotedField;
                        self.pos += 1;
                    } else if c == delimiter {
                        if !self.whitespace_delimited() {
                            self.empty_field()?;
                        }
                        self.pos += 1;
                    } else if is_newline(c) {
                        if !(self.whitespace_delimited() && self.field > 0) {
                            self.empty_field()?;
                        }
                        self.end_row();
                        self.consume_newline(c);
                        state = State::StartLine;
                    } else if strip_whitespace && is_whitespace(c) {
                        self.pos += 1;
                    } else {
                        self.start_field()?;
                        self.push_byte(c);
                        state = State::Field;
                        self.pos += 1;
                    }
                }
                State::Field => {
                    if c == delimiter {
                        self.end_field();
                        state = State::StartField;
                        self.pos += 1;
                    } else if is_newline(c) {
                        self.end_field();
                        self.end_row();
                        self.consume_newline(c);
                        state = State::StartLine;
                    } else {
                        self.push_byte(c);
                        self.pos += 1;
                    }
                }
                State::QuotedField => {
                    if c == quotechar {
                        self.mark_quoted();
                        state = State::QuoteInQuotedField;
                        self.pos += 1;
                    } else {
                        if c == b'\n'
                            || (c == b'\r' && self.source.get(self.pos + 1) != Some(&b'\n'))
                        {
                            self.line += 1;
                        }
                        self.push_byte(c);
                        self.pos += 1;
                    }
                }
                State::QuoteInQuotedField => {
                    if c == quotechar {
                        self.push_byte(c);
                        state = State::QuotedField;
                        self.pos += 1;
                    } else {
                        state = State::Field;
                    }
                }
                State::Comment => {
                    if is_newline(c) {
                        self.consume_newline(c);
                        state = State::StartLine;
                    } else {
                        self.pos += 1;
                    }
                }
            }
        }

        if self.is_done() {
            return Ok(());
        }
        match state {
            State::StartLine | State::Comment => {}
            State::StartField => {
                if !(self.whitespace_delimited() && self.field > 0) {
                    self.empty_field()?;
                }
                self.end_row();
            }
            State::Field | State::QuoteInQuotedField => {
                self.end_field();
                self.end_row();
            }
            State::QuotedField => return Err(self.error(ErrorCode::InvalidLine)),
        }
        Ok(())
    }
}

/// Splits a buffer of delimited text into columns.
///
/// The number of columns is fixed per pass by the first line it tokenizes. A call to
/// [`Tokenizer::tokenize_header`] fixes it for the next [`Tokenizer::tokenize_data`]
/// only; any other data pass takes it from its own first line. Lines with more fields
/// fail with [`ErrorCode::TooManyColumns`]; lines with fewer fields are padded with
/// empty fields.
///
/// Line indexes count significant lines only: blank lines and comment lines are skipped
/// and never produce rows.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    options: TokenizerOptions,
    // width set by the header, consumed by the next data pass
    header_width: Option<usize>,
    num_cols: Option<usize>,
}

impl Tokenizer {
    /// Creates a new [`Tokenizer`].
    /// # Errors
    /// If the delimiter, comment and quote bytes are not distinct ASCII bytes.
    pub fn new(options: TokenizerOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            header_width: None,
            num_cols: None,
        })
    }

    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// The number of columns fixed by the last pass, if any.
    pub fn num_cols(&self) -> Option<usize> {
        self.num_cols
    }

    /// Tokenizes the significant line `line_index` of `source`.
    ///
    /// When `use_header` is true, the fields of the line are the column names;
    /// otherwise the line is only used to count columns and `names` is empty.
    /// In both cases the width fixes the number of columns of the next data pass.
    /// # Errors
    /// [`ErrorCode::InvalidLine`] if the line does not exist or is malformed.
    pub fn tokenize_header(
        &mut self,
        source: &[u8],
        line_index: usize,
        use_header: bool,
    ) -> Result<Header> {
        debug!(line_index, use_header, "tokenizing header");
        self.header_width = None;

        let mut scan = Scan::new(
            &self.options,
            source,
            Phase::Header,
            line_index,
            Some(1),
            None,
        );
        scan.run()?;
        if scan.num_rows == 0 {
            return Err(scan.error(ErrorCode::InvalidLine));
        }

        let width = scan.columns.len();
        let names = if use_header {
            scan.columns
                .iter()
                .map(|column| {
                    let name = column.value(0).unwrap_or_default();
                    simdutf8::basic::from_utf8(name)
                        .map(|name| name.to_string())
                        .map_err(Error::from)
                })
                .collect::<Result<Vec<_>>>()?
        } else {
            vec![]
        };
        self.header_width = Some(width);
        self.num_cols = Some(width);
        debug!(width, "tokenized header");
        Ok(Header { names, width })
    }

    /// Tokenizes `source` from the significant line `start_line` to its end.
    /// # Errors
    /// [`ErrorCode::TooManyColumns`] if a line has more fields than the number of columns,
    /// [`ErrorCode::InvalidLine`] if a quoted field is not terminated.
    pub fn tokenize_data(&mut self, source: &[u8], start_line: usize) -> Result<TokenizedData> {
        let fixed = self.header_width.take();
        debug!(start_line, num_cols = ?fixed, "tokenizing data");
        let mut scan = Scan::new(&self.options, source, Phase::Data, start_line, None, fixed);
        scan.run()?;
        self.num_cols = scan.num_cols;

        debug!(
            num_rows = scan.num_rows,
            num_cols = scan.columns.len(),
            "tokenized data"
        );
        Ok(TokenizedData {
            columns: scan.columns,
            num_rows: scan.num_rows,
        })
    }
}
