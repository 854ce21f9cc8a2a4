use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use snake::app::SnakeApp;
use snake::config::Options;
use snake::store;

const LOG_FILE_NAME: &str = "obstacle-snake.log";

fn main() -> Result<()> {
    let options = Options::parse();
    init_tracing(options.log_file.clone());
    info!(grid_size = options.grid_size, seed = ?options.seed, "starting");

    let mut app = SnakeApp::from_options(&options)?;
    app.run()
}

/// Logs go to a file since the game owns the terminal. Logging stays off if
/// the file cannot be opened.
fn init_tracing(log_file: Option<PathBuf>) {
    let path = match log_file.or_else(|| store::data_dir().ok().map(|d| d.join(LOG_FILE_NAME))) {
        Some(path) => path,
        None => return,
    };

    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(_) => return,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
