//! Logging for a fetch run: live progress on stderr plus a debug log file.
//!
//! The console shows each GET, each file outcome and the per-map START/DONE
//! markers as they happen. The file under the XDG state dir keeps the full
//! debug trail and honours `RUST_LOG`. If the file cannot be opened the run
//! continues with the console alone.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "fastdl.log";
const FILE_FILTER: &str = "info,fastdl=debug,fastdl_core=debug";

/// How much the stderr console shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleLevel {
    /// Every request and file outcome.
    #[default]
    Progress,
    /// Warnings only.
    Quiet,
}

impl ConsoleLevel {
    fn directives(self) -> &'static str {
        match self {
            ConsoleLevel::Progress => "warn,fastdl=info,fastdl_core=info",
            ConsoleLevel::Quiet => "warn",
        }
    }
}

/// Installs the global subscriber. Returns the log file path, or `None` when
/// only the console is active.
pub fn init_logging(console: ConsoleLevel) -> Option<PathBuf> {
    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .with_filter(EnvFilter::new(console.directives()));

    match state_dir().and_then(|dir| open_log_file(&dir)) {
        Ok((path, file)) => {
            let file_filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(FILE_FILTER));
            let file_layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_filter(file_filter);
            let _ = tracing_subscriber::registry()
                .with(console_layer)
                .with(file_layer)
                .try_init();
            tracing::debug!("logging to {}", path.display());
            Some(path)
        }
        Err(e) => {
            let _ = tracing_subscriber::registry().with(console_layer).try_init();
            tracing::warn!("no log file, console only: {:#}", e);
            None
        }
    }
}

fn state_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fastdl")?;
    Ok(xdg_dirs.get_state_home())
}

/// Creates `dir` if needed and opens `dir/fastdl.log` for appending.
fn open_log_file(dir: &Path) -> Result<(PathBuf, File)> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = dir.join(LOG_FILE_NAME);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;
    Ok((path, file))
}
