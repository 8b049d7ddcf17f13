//! Log file setup. The terminal belongs to the TUI, so logs only ever go to
//! a file, and only when one is asked for.
//!
//! ```text
//! mpick --log-file /tmp/mpick.log      # info and above
//! MPICK_LOG=/tmp/mpick.log mpick       # same, path from the environment
//! RUST_LOG=multipick=debug mpick ...   # finer filter control
//! ```

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable naming the log file when `--log-file` is absent.
pub const LOG_ENV: &str = "MPICK_LOG";

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("could not open log file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("logging already initialised: {0}")]
    Init(String),
}

/// The log file to use: the flag wins over the environment.
pub fn log_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf).or_else(|| {
        std::env::var_os(LOG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

fn open_log(path: &Path) -> Result<File, LogError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Install the global subscriber writing to `path`. Filter from `RUST_LOG`,
/// default `info`.
pub fn init(path: &Path) -> Result<(), LogError> {
    let file = open_log(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| LogError::Init(err.to_string()))
}
