//! Log file setup.
//!
//! The terminal belongs to the UI, so events go to a file in the platform
//! data directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Level;

const LOG_FILE: &str = "constella.log";

/// Install the global subscriber. Returns the log path, or `None` if the
/// file could not be opened (logging stays disabled).
pub fn init(level: &str) -> Option<PathBuf> {
    let level = level.parse::<Level>().unwrap_or(Level::INFO);
    let dir = constella_config::project_dirs()?.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).ok()?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .ok()?;

    Some(path)
}
