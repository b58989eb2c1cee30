//! Row-based text storage.
//!
//! The buffer is a flat list of byte rows. Rows are only ever created by
//! appending past the last one, so the row count grows by at most one per
//! insertion.

use thiserror::Error;

/// Rejected buffer mutation. The buffer is left untouched when one of these
/// is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("Too many lines (max {max})")]
    TooManyLines { max: usize },
    #[error("Line too long (max {max})")]
    LineTooLong { max: usize },
}

/// Size limits applied to every insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferLimits {
    pub max_lines: usize,
    pub max_line_length: usize,
}

impl Default for BufferLimits {
    fn default() -> Self {
        Self {
            max_lines: 1000,
            max_line_length: 1000,
        }
    }
}

/// One line of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    chars: Vec<u8>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.chars
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    rows: Vec<Row>,
    limits: BufferLimits,
}

impl TextBuffer {
    pub fn new(limits: BufferLimits) -> Self {
        Self {
            rows: Vec::new(),
            limits,
        }
    }

    /// Build a buffer from existing lines. Lines over the limits are rejected
    /// with the same errors as `insert_char`.
    pub fn from_lines<I, L>(limits: BufferLimits, lines: I) -> Result<Self, BufferError>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut buffer = Self::new(limits);
        for line in lines {
            let line = line.as_ref();
            if buffer.rows.len() >= limits.max_lines {
                return Err(BufferError::TooManyLines {
                    max: limits.max_lines,
                });
            }
            if line.len() > limits.max_line_length {
                return Err(BufferError::LineTooLong {
                    max: limits.max_line_length,
                });
            }
            buffer.rows.push(Row {
                chars: line.to_vec(),
            });
        }
        Ok(buffer)
    }

    pub fn limits(&self) -> BufferLimits {
        self.limits
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Length of `row` in bytes. Panics if `row >= row_count()`.
    pub fn row_len(&self, row: usize) -> usize {
        self.rows[row].len()
    }

    /// Contents of `row`. Panics if `row >= row_count()`.
    pub fn row_bytes(&self, row: usize) -> &[u8] {
        self.rows[row].as_bytes()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Insert `byte` at `(row, col)`.
    ///
    /// `row == row_count()` appends a fresh row first. Either both the append
    /// and the insertion happen, or neither does.
    pub fn insert_char(&mut self, row: usize, col: usize, byte: u8) -> Result<(), BufferError> {
        let appending = row == self.rows.len();
        if appending {
            if self.rows.len() >= self.limits.max_lines {
                return Err(BufferError::TooManyLines {
                    max: self.limits.max_lines,
                });
            }
            if self.limits.max_line_length == 0 {
                return Err(BufferError::LineTooLong {
                    max: self.limits.max_line_length,
                });
            }
            self.rows.push(Row::new());
        } else if self.rows[row].len() >= self.limits.max_line_length {
            return Err(BufferError::LineTooLong {
                max: self.limits.max_line_length,
            });
        }

        let target = &mut self.rows[row];
        let col = col.min(target.chars.len());
        target.chars.insert(col, byte);
        Ok(())
    }

    /// Remove and return the byte at `(row, col)`, or `None` when `col` is at
    /// or past the end of the row.
    pub fn delete_char(&mut self, row: usize, col: usize) -> Option<u8> {
        let target = &mut self.rows[row];
        if col < target.chars.len() {
            Some(target.chars.remove(col))
        } else {
            None
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new(BufferLimits::default())
    }
}
