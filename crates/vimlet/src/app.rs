use anyhow::Result;

use crate::buffer::BufferLimits;
use crate::command_processor::{is_printable, Command, CommandProcessor};
use crate::config::Config;
use crate::cursor::Direction;
use crate::editor::Editor;
use crate::render;
use crate::terminal::{KeySource, RenderSink};
use crate::ui_state::UIState;

pub const ESC: u8 = 0x1b;
pub const ENTER: u8 = b'\r';
pub const BACKSPACE: u8 = 0x7f;
pub const CTRL_H: u8 = 0x08;

/// Control code produced by Ctrl + `c`.
pub const fn ctrl_key(c: u8) -> u8 {
    c & 0x1f
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
    Command,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
        }
    }
}

/// What the control loop should do after a key has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

pub struct App {
    pub editor: Editor,
    pub config: Config,
    pub ui_state: UIState,
    pub command_processor: CommandProcessor,
    quit_key: u8,
}

impl App {
    pub fn new(config: Config) -> Self {
        let limits = BufferLimits {
            max_lines: config.editor.max_lines,
            max_line_length: config.editor.max_line_length,
        };
        let quit_key = config.keys.quit_code();
        Self {
            editor: Editor::new(limits),
            ui_state: UIState::new(config.editor.command_capacity),
            command_processor: CommandProcessor::new(),
            config,
            quit_key,
        }
    }

    pub fn mode(&self) -> Mode {
        self.ui_state.get_mode()
    }

    pub fn status_message(&self) -> &str {
        self.ui_state.get_status_message()
    }

    pub fn command_buffer(&self) -> &str {
        self.ui_state.get_command_buffer()
    }

    pub fn should_quit(&self) -> bool {
        self.ui_state.should_quit()
    }

    pub fn quit(&mut self) {
        self.ui_state.quit();
    }

    /// Dispatch a single key code according to the current mode.
    pub fn handle_key(&mut self, key: u8) -> KeyOutcome {
        let before = self.mode();
        match before {
            Mode::Normal => self.handle_normal_mode_key(key),
            Mode::Insert => self.handle_insert_mode_key(key),
            Mode::Command => self.handle_command_key(key),
        }
        let after = self.mode();
        if before != after {
            log::debug!("mode {} -> {}", before.as_str(), after.as_str());
        }

        if self.should_quit() {
            KeyOutcome::Quit
        } else {
            KeyOutcome::Continue
        }
    }

    fn handle_normal_mode_key(&mut self, key: u8) {
        match key {
            b':' => self.ui_state.enter_command_mode(),
            b'i' => self.ui_state.enter_insert_mode(),
            _ => {
                if let Some(direction) = Direction::from_key(key) {
                    self.editor.move_cursor(direction);
                }
            }
        }
    }

    fn handle_insert_mode_key(&mut self, key: u8) {
        match key {
            k if k == self.quit_key => {
                log::info!("quit key pressed in insert mode");
                self.quit();
            }
            ESC => self.ui_state.enter_normal_mode(),
            BACKSPACE | CTRL_H => {
                self.editor.delete_char_backward();
            }
            k if is_printable(k) => {
                if let Err(e) = self.editor.insert_char(k) {
                    self.ui_state.set_error_message(e.to_string());
                }
            }
            _ => {}
        }
    }

    fn handle_command_key(&mut self, key: u8) {
        match key {
            ENTER => {
                let command = self.ui_state.get_command_buffer().to_string();
                let parsed = self
                    .command_processor
                    .execute_command(&command, &mut self.ui_state.should_quit);
                self.ui_state.clear_command_buffer();
                self.ui_state.enter_normal_mode();
                if parsed == Command::Quit {
                    log::info!("quit command accepted");
                }
            }
            ESC => self.cancel_command(),
            BACKSPACE | CTRL_H => {
                self.ui_state.pop_from_command_buffer();
                if self.ui_state.get_command_buffer().is_empty() {
                    self.cancel_command();
                }
            }
            k => {
                self.ui_state.push_to_command_buffer(k);
            }
        }
    }

    fn cancel_command(&mut self) {
        self.ui_state.clear_command_buffer();
        self.ui_state.enter_normal_mode();
    }

    /// Render, read one key, dispatch; until a quit is requested or the key
    /// source fails.
    pub fn run<K: KeySource, S: RenderSink>(&mut self, keys: &mut K, sink: &mut S) -> Result<()> {
        loop {
            sink.draw(&render::render(self))?;

            let Some(key) = keys.read_key()? else {
                continue;
            };
            if self.handle_key(key) == KeyOutcome::Quit {
                log::info!("editor loop finished");
                return Ok(());
            }
        }
    }
}
