//! Screen description derived from editor state.
//!
//! `render` is pure: it turns the buffer, cursor and mode into a list of draw
//! operations, and a `RenderSink` decides how to put them on a screen.

use crate::app::{App, Mode};
use crate::buffer::TextBuffer;
use crate::cursor::Cursor;

/// Longest status line emitted, in characters.
pub const STATUS_LINE_CAPACITY: usize = 79;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    ClearScreen,
    CursorHome,
    /// One buffer row followed by a line break.
    Line(Vec<u8>),
    /// Drawn in reverse video.
    StatusLine(String),
    /// 1-based terminal coordinates.
    PlaceCursor { row: usize, col: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub ops: Vec<DrawOp>,
}

pub fn render(app: &App) -> Frame {
    render_parts(
        app.editor.buffer(),
        app.editor.cursor(),
        app.mode(),
        app.ui_state.displayed_status(),
        app.config.editor.status_width,
    )
}

pub fn render_parts(
    buffer: &TextBuffer,
    cursor: Cursor,
    mode: Mode,
    status: &str,
    status_width: usize,
) -> Frame {
    let mut ops = Vec::with_capacity(buffer.row_count() + 4);
    ops.push(DrawOp::ClearScreen);
    ops.push(DrawOp::CursorHome);
    ops.extend(
        buffer
            .rows()
            .iter()
            .map(|row| DrawOp::Line(row.as_bytes().to_vec())),
    );
    ops.push(DrawOp::StatusLine(status_line(status, mode, status_width)));
    ops.push(DrawOp::PlaceCursor {
        row: cursor.row + 1,
        col: cursor.col + 1,
    });
    Frame { ops }
}

/// `"<status> - <MODE> mode"`, with the status cut to `width` characters.
pub fn status_line(status: &str, mode: Mode, width: usize) -> String {
    let shown: String = status.chars().take(width).collect();
    let line = format!("{} - {} mode", shown, mode.as_str());
    line.chars().take(STATUS_LINE_CAPACITY).collect()
}
