use crate::app::Mode;
use crate::command_processor::CommandLine;

/// Longest status message kept, in bytes.
pub const STATUS_CAPACITY: usize = 79;

#[derive(Debug, Clone)]
pub struct UIState {
    pub mode: Mode,
    pub status_message: String,
    pub command_line: CommandLine,
    pub should_quit: bool,
}

impl UIState {
    pub fn new(command_capacity: usize) -> Self {
        Self {
            mode: Mode::Normal,
            status_message: String::new(),
            command_line: CommandLine::new(command_capacity),
            should_quit: false,
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn get_mode(&self) -> Mode {
        self.mode
    }

    pub fn get_status_message(&self) -> &str {
        &self.status_message
    }

    /// Text for the status line: the live command line in Command mode,
    /// the status message otherwise.
    pub fn displayed_status(&self) -> &str {
        match self.mode {
            Mode::Command => self.command_line.as_str(),
            Mode::Normal | Mode::Insert => &self.status_message,
        }
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        let mut message = message.into();
        if message.len() > STATUS_CAPACITY {
            let mut end = STATUS_CAPACITY;
            while !message.is_char_boundary(end) {
                end -= 1;
            }
            message.truncate(end);
        }
        self.status_message = message;
    }

    pub fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    pub fn set_error_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        self.set_status_message(message);
    }

    pub fn enter_command_mode(&mut self) {
        self.mode = Mode::Command;
        self.command_line.begin();
        self.status_message.clear();
    }

    pub fn enter_insert_mode(&mut self) {
        self.mode = Mode::Insert;
        self.set_status_message("-- INSERT --");
    }

    pub fn enter_normal_mode(&mut self) {
        self.mode = Mode::Normal;
        self.status_message.clear();
    }

    pub fn get_command_buffer(&self) -> &str {
        self.command_line.as_str()
    }

    pub fn push_to_command_buffer(&mut self, byte: u8) -> bool {
        self.command_line.push(byte)
    }

    pub fn pop_from_command_buffer(&mut self) -> Option<char> {
        self.command_line.pop()
    }

    pub fn clear_command_buffer(&mut self) {
        self.command_line.clear();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

impl Default for UIState {
    fn default() -> Self {
        Self::new(80)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_state_creation() {
        let state = UIState::default();
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.status_message, "");
        assert_eq!(state.get_command_buffer(), "");
        assert!(!state.should_quit);
    }

    #[test]
    fn test_mode_transitions() {
        let mut state = UIState::default();

        state.enter_insert_mode();
        assert_eq!(state.mode, Mode::Insert);
        assert_eq!(state.status_message, "-- INSERT --");

        state.enter_normal_mode();
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.status_message, "");

        state.enter_command_mode();
        assert_eq!(state.mode, Mode::Command);
        assert_eq!(state.get_command_buffer(), ":");
        assert_eq!(state.displayed_status(), ":");
    }

    #[test]
    fn test_status_message_starting_with_colon_is_not_a_command() {
        let mut state = UIState::default();
        state.set_status_message(":q");
        assert_eq!(state.displayed_status(), ":q");
        assert_eq!(state.get_command_buffer(), "");
    }

    #[test]
    fn test_status_message_is_bounded() {
        let mut state = UIState::default();
        state.set_status_message("x".repeat(200));
        assert_eq!(state.status_message.len(), STATUS_CAPACITY);
    }

    #[test]
    fn test_command_buffer_operations() {
        let mut state = UIState::default();
        state.enter_command_mode();

        state.push_to_command_buffer(b'w');
        state.push_to_command_buffer(b'q');
        assert_eq!(state.get_command_buffer(), ":wq");

        state.pop_from_command_buffer();
        assert_eq!(state.get_command_buffer(), ":w");

        state.clear_command_buffer();
        assert_eq!(state.get_command_buffer(), "");
    }

    #[test]
    fn test_quit_operations() {
        let mut state = UIState::default();
        assert!(!state.should_quit());
        state.quit();
        assert!(state.should_quit());
    }
}
