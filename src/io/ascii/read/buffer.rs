use crate::error::{Error, ErrorCode, Result};

/// The fields of a single column, stored contiguously.
///
/// Field `i` spans `values[offsets[i]..offsets[i + 1]]`. `offsets` always starts with `0`,
/// so an empty field (two equal offsets) is distinguishable from the absence of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBuffer {
    offsets: Vec<usize>,
    values: Vec<u8>,
}

impl Default for ColumnBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnBuffer {
    pub fn new() -> Self {
        Self {
            offsets: vec![0],
            values: vec![],
        }
    }

    /// Number of terminated fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a byte to the field being built.
    #[inline]
    pub(super) fn push_byte(&mut self, byte: u8) {
        self.values.push(byte);
    }

    /// Bytes of the field being built, i.e. pushed since the last terminator.
    #[inline]
    pub(super) fn pending_len(&self) -> usize {
        self.values.len() - self.offsets[self.offsets.len() - 1]
    }

    /// Drops the bytes of the field being built beyond its first `len`.
    #[inline]
    pub(super) fn truncate_pending(&mut self, len: usize) {
        let start = self.offsets[self.offsets.len() - 1];
        self.values.truncate(start + len);
    }

    #[inline]
    pub(super) fn pending(&self) -> &[u8] {
        &self.values[self.offsets[self.offsets.len() - 1]..]
    }

    /// Terminates the field being built.
    #[inline]
    pub(super) fn end_field(&mut self) {
        self.offsets.push(self.values.len());
    }

    /// Appends a whole terminated field.
    pub fn push(&mut self, field: &[u8]) {
        self.values.extend_from_slice(field);
        self.end_field();
    }

    /// Returns the field at `index`, if terminated.
    #[inline]
    pub fn value(&self, index: usize) -> Option<&[u8]> {
        let start = *self.offsets.get(index)?;
        let end = *self.offsets.get(index + 1)?;
        Some(&self.values[start..end])
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + Clone + '_ {
        self.offsets
            .windows(2)
            .map(move |w| &self.values[w[0]..w[1]])
    }

    /// Decodes exactly `num_rows` fields.
    /// # Errors
    /// [`ErrorCode::InvalidLine`] when the buffer terminates before `num_rows` fields.
    pub fn decode(&self, column: usize, num_rows: usize) -> Result<Vec<&[u8]>> {
        if self.len() < num_rows {
            return Err(Error::Decode {
                column,
                code: ErrorCode::InvalidLine,
            });
        }
        Ok(self.iter().take(num_rows).collect())
    }
}
