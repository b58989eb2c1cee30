// vimlet library exports

pub mod app;
pub mod buffer;
pub mod command_processor;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod render;
pub mod terminal;
pub mod ui_state;

pub use app::{App, KeyOutcome, Mode};
pub use buffer::{BufferError, BufferLimits, TextBuffer};
pub use config::Config;
pub use editor::Editor;
pub use ui_state::UIState;
