use std::fs;
use std::path::{Path, PathBuf};

use crate::model::FileConfig;

pub const CONFIG_FILE: &str = "mpick.toml";

/// Error type for config file I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Find mpick.toml by walking up from the given directory.
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the explicit config if given, else the discovered one, else defaults.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<FileConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    match discover_config(cwd) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using discovered config");
            read_config(&path)
        }
        None => Ok(FileConfig::default()),
    }
}
