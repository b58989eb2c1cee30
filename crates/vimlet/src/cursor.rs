use crate::buffer::TextBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Down,
    Up,
    Right,
}

impl Direction {
    /// Map a vi motion key to its direction.
    pub fn from_key(key: u8) -> Option<Self> {
        match key {
            b'h' => Some(Direction::Left),
            b'j' => Some(Direction::Down),
            b'k' => Some(Direction::Up),
            b'l' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Cursor position. `row` may equal the buffer's row count, the virtual
/// line below all content, in which case `col` is always 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn move_to(&mut self, buffer: &TextBuffer, row: usize, col: usize) {
        self.row = row;
        self.col = col;
        self.clamp(buffer);
    }

    pub fn move_in(&mut self, direction: Direction, buffer: &TextBuffer) {
        let rows = buffer.row_count();
        match direction {
            Direction::Left => {
                if self.col > 0 {
                    self.col -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = row_len(buffer, self.row);
                }
            }
            Direction::Down => {
                if self.row < rows {
                    self.row += 1;
                }
            }
            Direction::Up => {
                if self.row > 0 {
                    self.row -= 1;
                }
            }
            Direction::Right => {
                if self.row < rows {
                    if self.col < buffer.row_len(self.row) {
                        self.col += 1;
                    } else if self.row + 1 < rows {
                        self.row += 1;
                        self.col = 0;
                    }
                }
            }
        }
        self.clamp(buffer);
    }

    /// Advance one column after an insertion at the cursor.
    pub fn advance(&mut self, buffer: &TextBuffer) {
        self.col += 1;
        self.clamp(buffer);
    }

    /// Step back one column within the row, used after deleting the byte
    /// before the cursor.
    pub fn retreat(&mut self, buffer: &TextBuffer) {
        self.col = self.col.saturating_sub(1);
        self.clamp(buffer);
    }

    pub fn clamp(&mut self, buffer: &TextBuffer) {
        self.row = self.row.min(buffer.row_count());
        self.col = self.col.min(row_len(buffer, self.row));
    }

    pub fn is_valid(&self, buffer: &TextBuffer) -> bool {
        self.row <= buffer.row_count() && self.col <= row_len(buffer, self.row)
    }
}

// 0 on the virtual trailing row.
fn row_len(buffer: &TextBuffer, row: usize) -> usize {
    if row < buffer.row_count() {
        buffer.row_len(row)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BufferLimits;

    fn buffer(lines: &[&str]) -> TextBuffer {
        TextBuffer::from_lines(BufferLimits::default(), lines).unwrap()
    }

    #[test]
    fn test_left_wraps_to_previous_row_end() {
        let buffer = buffer(&["ab", "cd"]);
        let mut cursor = Cursor::new(1, 0);
        cursor.move_in(Direction::Left, &buffer);
        assert_eq!(cursor, Cursor::new(0, 2));
    }

    #[test]
    fn test_left_at_origin_stays() {
        let buffer = buffer(&["ab"]);
        let mut cursor = Cursor::new(0, 0);
        cursor.move_in(Direction::Left, &buffer);
        assert_eq!(cursor, Cursor::new(0, 0));
    }

    #[test]
    fn test_left_from_virtual_row_lands_on_last_row_end() {
        let buffer = buffer(&["abc"]);
        let mut cursor = Cursor::new(1, 0);
        cursor.move_in(Direction::Left, &buffer);
        assert_eq!(cursor, Cursor::new(0, 3));
    }

    #[test]
    fn test_down_reaches_virtual_row_then_stops() {
        let buffer = buffer(&["abc"]);
        let mut cursor = Cursor::new(0, 2);
        cursor.move_in(Direction::Down, &buffer);
        assert_eq!(cursor, Cursor::new(1, 0));
        cursor.move_in(Direction::Down, &buffer);
        assert_eq!(cursor, Cursor::new(1, 0));
    }

    #[test]
    fn test_up_clamps_column() {
        let buffer = buffer(&["a", "long line"]);
        let mut cursor = Cursor::new(1, 7);
        cursor.move_in(Direction::Up, &buffer);
        assert_eq!(cursor, Cursor::new(0, 1));
        cursor.move_in(Direction::Up, &buffer);
        assert_eq!(cursor, Cursor::new(0, 1));
    }

    #[test]
    fn test_right_wraps_to_next_row_but_not_past_last() {
        let buffer = buffer(&["ab", "c"]);
        let mut cursor = Cursor::new(0, 2);
        cursor.move_in(Direction::Right, &buffer);
        assert_eq!(cursor, Cursor::new(1, 0));
        cursor.move_in(Direction::Right, &buffer);
        assert_eq!(cursor, Cursor::new(1, 1));
        cursor.move_in(Direction::Right, &buffer);
        assert_eq!(cursor, Cursor::new(1, 1));
    }

    #[test]
    fn test_empty_buffer_moves_are_noops() {
        let buffer = TextBuffer::default();
        let mut cursor = Cursor::default();
        for direction in [Direction::Left, Direction::Down, Direction::Up, Direction::Right] {
            cursor.move_in(direction, &buffer);
            assert_eq!(cursor, Cursor::new(0, 0));
        }
    }

    #[test]
    fn test_move_to_clamps() {
        let buffer = buffer(&["abc", "de"]);
        let mut cursor = Cursor::default();
        cursor.move_to(&buffer, 1, 10);
        assert_eq!(cursor, Cursor::new(1, 2));
        cursor.move_to(&buffer, 9, 9);
        assert_eq!(cursor, Cursor::new(2, 0));
    }

    #[test]
    fn test_clamp_invariant_over_move_sequence() {
        let buffer = buffer(&["hello", "", "a longer line", "x"]);
        let mut cursor = Cursor::default();
        let keys = b"lllljjjlllllllllkkhhhhhhhhhhjjjjjlllkkkkhhh";
        for &key in keys {
            let direction = Direction::from_key(key).unwrap();
            cursor.move_in(direction, &buffer);
            assert!(cursor.is_valid(&buffer), "invalid cursor {:?}", cursor);
        }
    }

    #[test]
    fn test_direction_from_key() {
        assert_eq!(Direction::from_key(b'h'), Some(Direction::Left));
        assert_eq!(Direction::from_key(b'j'), Some(Direction::Down));
        assert_eq!(Direction::from_key(b'k'), Some(Direction::Up));
        assert_eq!(Direction::from_key(b'l'), Some(Direction::Right));
        assert_eq!(Direction::from_key(b'x'), None);
    }
}
