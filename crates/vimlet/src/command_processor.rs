/// A recognised ex command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Unknown(String),
}

/// Parse a full command line, leading `:` included. Matching is exact: no
/// trimming, no abbreviations.
pub fn parse_command(line: &str) -> Command {
    match line {
        ":q" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// The in-progress command line while in Command mode.
#[derive(Debug, Clone)]
pub struct CommandLine {
    buffer: String,
    capacity: usize,
}

impl CommandLine {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
            capacity,
        }
    }

    /// Start a fresh command line holding just the `:` prompt.
    pub fn begin(&mut self) {
        self.buffer.clear();
        if self.capacity > 0 {
            self.buffer.push(':');
        }
    }

    /// Append a printable ASCII byte. Returns false when the byte was
    /// dropped, either because it is not printable or the line is full.
    pub fn push(&mut self, byte: u8) -> bool {
        if !is_printable(byte) || self.buffer.len() >= self.capacity {
            return false;
        }
        self.buffer.push(byte as char);
        true
    }

    pub fn pop(&mut self) -> Option<char> {
        self.buffer.pop()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

pub struct CommandProcessor;

impl CommandProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn execute_command(&self, command: &str, should_quit: &mut bool) -> Command {
        let parsed = parse_command(command);
        match &parsed {
            Command::Quit => {
                log::debug!("quit requested from command line");
                *should_quit = true;
            }
            Command::Unknown(text) => {
                log::debug!("discarding unknown command {:?}", text);
            }
        }
        parsed
    }
}

impl Default for CommandProcessor {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_printable(byte: u8) -> bool {
    (0x20..0x7f).contains(&byte)
}
