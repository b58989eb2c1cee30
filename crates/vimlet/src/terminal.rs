//! Terminal boundary: raw-mode session, key input and frame output.

use anyhow::Result;
use crossterm::{
    cursor::{MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, Write};
use std::time::Duration;

use crate::app::{ctrl_key, BACKSPACE, ENTER, ESC};
use crate::render::{DrawOp, Frame};

/// Source of key codes. `Ok(None)` means no key arrived before the timeout.
pub trait KeySource {
    fn read_key(&mut self) -> Result<Option<u8>>;
}

pub trait RenderSink {
    fn draw(&mut self, frame: &Frame) -> Result<()>;
}

/// Raw mode plus alternate screen, undone on drop.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn start() -> Result<Self> {
        enable_raw_mode().map_err(|e| anyhow::anyhow!("Failed to enable raw mode: {}", e))?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(anyhow::anyhow!("Failed to enter alternate screen: {}", e));
        }
        log::debug!("terminal session started");
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal() {
            log::error!("Failed to restore terminal: {}", e);
        }
    }
}

/// Restore terminal to normal state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;
    let _ = execute!(stdout, Show);
    Ok(())
}

pub struct CrosstermKeys {
    timeout: Duration,
}

impl CrosstermKeys {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for CrosstermKeys {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl KeySource for CrosstermKeys {
    fn read_key(&mut self) -> Result<Option<u8>> {
        if !event::poll(self.timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => Ok(key_to_byte(&key)),
            _ => Ok(None),
        }
    }
}

/// Translate a key event into the byte a raw-mode terminal would send.
/// Keys with no single-byte form yield `None`.
pub fn key_to_byte(key: &KeyEvent) -> Option<u8> {
    match key.code {
        KeyCode::Char(c) if c.is_ascii() => {
            let byte = c as u8;
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                Some(ctrl_key(byte))
            } else {
                Some(byte)
            }
        }
        KeyCode::Esc => Some(ESC),
        KeyCode::Enter => Some(ENTER),
        KeyCode::Tab => Some(b'\t'),
        KeyCode::Backspace => Some(BACKSPACE),
        _ => None,
    }
}

/// Writes frames as ANSI escape sequences.
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn draw(&mut self, frame: &Frame) -> Result<()> {
        for op in &frame.ops {
            match op {
                DrawOp::ClearScreen => queue!(self.out, Clear(ClearType::All))?,
                DrawOp::CursorHome => queue!(self.out, MoveTo(0, 0))?,
                DrawOp::Line(bytes) => {
                    self.out.write_all(bytes)?;
                    self.out.write_all(b"\r\n")?;
                }
                DrawOp::StatusLine(text) => queue!(
                    self.out,
                    SetAttribute(Attribute::Reverse),
                    Print(text),
                    SetAttribute(Attribute::Reset)
                )?,
                DrawOp::PlaceCursor { row, col } => {
                    queue!(self.out, MoveTo(to_cell(*col), to_cell(*row)))?
                }
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

// 1-based position to crossterm's 0-based cell index.
fn to_cell(position: usize) -> u16 {
    u16::try_from(position.saturating_sub(1)).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_to_string(frame: &Frame) -> String {
        let mut sink = TerminalSink::new(Vec::new());
        sink.draw(frame).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_key_translation() {
        let plain = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(key_to_byte(&plain(KeyCode::Char('a'))), Some(b'a'));
        assert_eq!(key_to_byte(&plain(KeyCode::Char(':'))), Some(b':'));
        assert_eq!(key_to_byte(&plain(KeyCode::Esc)), Some(27));
        assert_eq!(key_to_byte(&plain(KeyCode::Enter)), Some(b'\r'));
        assert_eq!(key_to_byte(&plain(KeyCode::Backspace)), Some(127));
        assert_eq!(key_to_byte(&plain(KeyCode::Left)), None);
        assert_eq!(key_to_byte(&plain(KeyCode::Char('é'))), None);

        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(key_to_byte(&ctrl_q), Some(0x11));
    }

    #[test]
    fn test_frame_escape_sequences() {
        let frame = Frame {
            ops: vec![
                DrawOp::ClearScreen,
                DrawOp::CursorHome,
                DrawOp::Line(b"abc".to_vec()),
                DrawOp::StatusLine(" - NORMAL mode".to_string()),
                DrawOp::PlaceCursor { row: 1, col: 4 },
            ],
        };
        let output = draw_to_string(&frame);

        assert!(output.starts_with("\x1b[2J\x1b[1;1H"));
        assert!(output.contains("abc\r\n"));
        assert!(output.contains("\x1b[7m - NORMAL mode\x1b[0m"));
        assert!(output.ends_with("\x1b[1;4H"));
    }

    #[test]
    fn test_to_cell() {
        assert_eq!(to_cell(1), 0);
        assert_eq!(to_cell(10), 9);
        assert_eq!(to_cell(0), 0);
        assert_eq!(to_cell(usize::MAX), u16::MAX);
    }
}
