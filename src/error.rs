//! Centralized error types for the logging facility
//!
//! Errors never escape a `write` call: sinks swallow their own failures.
//! `LogError` is only surfaced by configuration loading, level parsing and
//! the internal file-sink plumbing (which the dispatcher then contains).
//! Use `Result<T>` as shorthand for `std::result::Result<T, LogError>`.

use std::fmt;
use std::path::PathBuf;

/// All logging facility errors
#[derive(Debug)]
pub enum LogError {
    // === File sink ===
    /// Failed to open (or create) the log file
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    /// File sink was enabled without a destination
    FileMissingPath,

    // === Config ===
    /// Failed to read a config file
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file is not valid TOML for `LogConfig`
    ConfigParse { path: PathBuf, reason: String },

    // === Parsing ===
    /// Unknown level name or out-of-range level number
    InvalidLevel { value: String },
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileOpen { source, .. } | Self::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileOpen { path, source } => {
                write!(f, "Cannot open log file {}: {}", path.display(), source)
            }
            Self::FileMissingPath => write!(f, "File output enabled without a path"),
            Self::ConfigRead { path, .. } => write!(f, "Cannot read config: {}", path.display()),
            Self::ConfigParse { path, reason } => {
                write!(f, "Invalid config {}: {}", path.display(), reason)
            }
            Self::InvalidLevel { value } => write!(f, "Unknown log level '{}'", value),
        }
    }
}

/// Alias for Result with LogError
pub type Result<T> = std::result::Result<T, LogError>;
