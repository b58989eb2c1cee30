use anyhow::Result;
use directories::ProjectDirs;
use env_logger::Target;
use log::LevelFilter;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

use vimlet::terminal::{self, CrosstermKeys, TerminalSession, TerminalSink};
use vimlet::{App, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logger();

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::restore_terminal();
        original_hook(panic_info);
    }));

    let config = match Config::load().await {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Falling back to default config: {}", e);
            Config::default()
        }
    };

    let session = match TerminalSession::start() {
        Ok(session) => session,
        Err(e) => {
            eprintln!("vimlet: terminal setup failed: {}", e);
            log::error!("Terminal setup failed: {}", e);
            std::process::exit(1);
        }
    };

    let mut app = App::new(config);
    log::info!("Application initialized successfully");

    let mut keys = CrosstermKeys::default();
    let mut sink = TerminalSink::new(io::stdout());
    let res = app.run(&mut keys, &mut sink);

    drop(session);

    if let Err(err) = res {
        eprintln!("vimlet: {}", err);
        log::error!("Application error: {}", err);
        std::process::exit(1);
    }

    log::info!("Application loop ended successfully");
    Ok(())
}

/// The terminal belongs to the editor, so log records go to a file. Logging
/// stays uninitialised when no file can be opened.
fn init_logger() {
    let mut logger = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        logger.filter_level(LevelFilter::Info);
        logger.filter_module("vimlet", LevelFilter::Debug);
    }

    match log_file_path().and_then(|path| {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    }) {
        Some(file) => {
            logger.target(Target::Pipe(Box::new(file)));
        }
        None => return,
    }

    logger.init();
}

fn log_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("VIMLET_LOG_FILE") {
        return Some(PathBuf::from(path));
    }
    ProjectDirs::from("com", "vimlet", "vimlet").map(|dirs| dirs.cache_dir().join("vimlet.log"))
}
