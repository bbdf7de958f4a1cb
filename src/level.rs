//! Severity levels
//!
//! Levels are ordered from most severe to most verbose. A message is visible
//! when its numeric value is at or below the current threshold.

use crate::error::LogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log severity, ordered by increasing verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    /// Threshold sentinel that silences all log traffic. Never attached to a message.
    None = 0,
    Error = 1,
    Warning = 2,
    Info = 3,
    Verbose = 4,
    Dev = 5,
    Debug = 6,
    Trace = 7,
}

impl Level {
    /// All levels, in numeric order
    pub const ALL: [Level; 8] = [
        Level::None,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Verbose,
        Level::Dev,
        Level::Debug,
        Level::Trace,
    ];

    /// Threshold a fresh state starts with
    pub const DEFAULT_THRESHOLD: Level = if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    };

    /// Convert a raw value back into a level, saturating at `Trace`
    #[inline]
    pub const fn from_u8(value: u8) -> Level {
        match value {
            0 => Level::None,
            1 => Level::Error,
            2 => Level::Warning,
            3 => Level::Info,
            4 => Level::Verbose,
            5 => Level::Dev,
            6 => Level::Debug,
            _ => Level::Trace,
        }
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether a message at `self` passes `threshold`
    #[inline]
    pub const fn passes(self, threshold: Level) -> bool {
        !matches!(self, Level::None) && self as u8 <= threshold as u8
    }

    /// Upper-case name used in rendered lines
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::None => "NONE",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
            Level::Verbose => "VERBOSE",
            Level::Dev => "DEV",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::DEFAULT_THRESHOLD
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u8>() {
            return match n {
                0..=7 => Ok(Level::from_u8(n)),
                _ => Err(LogError::InvalidLevel { value: s.into() }),
            };
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(Level::None),
            "error" => Ok(Level::Error),
            "warning" | "warn" => Ok(Level::Warning),
            "info" => Ok(Level::Info),
            "verbose" => Ok(Level::Verbose),
            "dev" => Ok(Level::Dev),
            "debug" => Ok(Level::Debug),
            "trace" => Ok(Level::Trace),
            _ => Err(LogError::InvalidLevel { value: s.into() }),
        }
    }
}
