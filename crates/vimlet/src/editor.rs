use crate::buffer::{BufferError, BufferLimits, TextBuffer};
use crate::cursor::{Cursor, Direction};

/// Text buffer plus the cursor that edits it. Every method leaves the cursor
/// clamped to the buffer.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    buffer: TextBuffer,
    cursor: Cursor,
}

impl Editor {
    pub fn new(limits: BufferLimits) -> Self {
        Self {
            buffer: TextBuffer::new(limits),
            cursor: Cursor::default(),
        }
    }

    pub fn from_buffer(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            cursor: Cursor::default(),
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn cursor_position(&self) -> (usize, usize) {
        (self.cursor.row, self.cursor.col)
    }

    pub fn set_cursor_position(&mut self, row: usize, col: usize) {
        self.cursor.move_to(&self.buffer, row, col);
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        self.cursor.move_in(direction, &self.buffer);
    }

    pub fn move_cursor_left(&mut self) {
        self.move_cursor(Direction::Left);
    }

    pub fn move_cursor_down(&mut self) {
        self.move_cursor(Direction::Down);
    }

    pub fn move_cursor_up(&mut self) {
        self.move_cursor(Direction::Up);
    }

    pub fn move_cursor_right(&mut self) {
        self.move_cursor(Direction::Right);
    }

    /// Insert `byte` at the cursor and step past it.
    pub fn insert_char(&mut self, byte: u8) -> Result<(), BufferError> {
        self.buffer
            .insert_char(self.cursor.row, self.cursor.col, byte)?;
        self.cursor.advance(&self.buffer);
        Ok(())
    }

    /// Delete the byte before the cursor. Does nothing at the start of a row.
    pub fn delete_char_backward(&mut self) -> Option<u8> {
        if self.cursor.col == 0 || self.cursor.row >= self.buffer.row_count() {
            return None;
        }
        let removed = self
            .buffer
            .delete_char(self.cursor.row, self.cursor.col - 1);
        if removed.is_some() {
            self.cursor.retreat(&self.buffer);
        }
        removed
    }

    /// Full contents joined with newlines.
    pub fn get_content(&self) -> String {
        self.buffer
            .rows()
            .iter()
            .map(|row| String::from_utf8_lossy(row.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
