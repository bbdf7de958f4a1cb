//! Configuration management
//!
//! A `LogConfig` mirrors every runtime setting of a `LogState` and can be
//! loaded from / saved to TOML:
//!
//! ```toml
//! level = "info"
//! filter = "GPU,Pad*"
//!
//! [console]
//! enabled = true
//! timestamps = false
//!
//! [debug]
//! enabled = false
//!
//! [file]
//! enabled = true
//! path = "logs/app.log"
//! timestamps = true
//! ```

use crate::constants::{DEFAULT_CONSOLE_TIMESTAMPS, DEFAULT_FILE_TIMESTAMPS};
use crate::error::{LogError, Result};
use crate::level::Level;
use crate::state::LogState;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub timestamps: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            timestamps: DEFAULT_CONSOLE_TIMESTAMPS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub enabled: bool,
    /// Log file path (required when enabled)
    pub path: Option<PathBuf>,
    pub timestamps: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: None,
            timestamps: DEFAULT_FILE_TIMESTAMPS,
        }
    }
}

// =============================================================================
// Logging Configuration
// =============================================================================

/// Complete logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Maximum verbosity dispatched
    pub level: Level,
    /// Channel filter spec (see `chanlog::channel`)
    pub filter: String,
    pub console: ConsoleConfig,
    pub debug: DebugConfig,
    pub file: FileConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::DEFAULT_THRESHOLD,
            filter: String::new(),
            console: ConsoleConfig::default(),
            debug: DebugConfig::default(),
            file: FileConfig::default(),
        }
    }
}

impl LogConfig {
    /// Parse from TOML text. `origin` only labels errors.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| LogError::ConfigParse {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| LogError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content, path)?;
        debug!(path = %path.display(), "log config loaded");
        Ok(config)
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> String {
        // Every field is a plain TOML value, serialization cannot fail.
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

impl LogState {
    /// Apply every setting of `config`
    pub fn apply_config(&self, config: &LogConfig) {
        self.set_log_level(config.level);
        self.set_log_filter(&config.filter);
        self.set_console_output_params(config.console.enabled, config.console.timestamps);
        self.set_debug_output_params(config.debug.enabled);
        self.set_file_output_params(
            config.file.enabled,
            config.file.path.as_deref(),
            config.file.timestamps,
        );
    }

    /// Snapshot of the current settings
    pub fn config(&self) -> LogConfig {
        self.with_sinks(|sinks| LogConfig {
            level: self.log_level(),
            filter: self.log_filter(),
            console: ConsoleConfig {
                enabled: sinks.console().is_enabled(),
                timestamps: sinks.console().timestamps(),
            },
            debug: DebugConfig {
                enabled: sinks.debug().is_enabled(),
            },
            file: FileConfig {
                enabled: sinks.file().is_enabled(),
                path: sinks.file().path().map(Path::to_path_buf),
                timestamps: sinks.file().timestamps(),
            },
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_temp_dir() -> PathBuf {
        let base = std::env::temp_dir();
        let pid = std::process::id();
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        base.join(format!("chanlog-config-{}-{}", pid, ts))
    }

    // =========================================================================
    // Default values tests
    // =========================================================================

    #[test]
    fn test_default_config_values() {
        let config = LogConfig::default();

        assert_eq!(config.level, Level::DEFAULT_THRESHOLD);
        assert_eq!(config.filter, "");
        assert!(!config.console.enabled);
        assert!(config.console.timestamps);
        assert!(!config.debug.enabled);
        assert!(!config.file.enabled);
        assert_eq!(config.file.path, None);
        assert!(config.file.timestamps);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = LogConfig::from_toml_str("", Path::new("inline")).unwrap();
        assert_eq!(config, LogConfig::default());
    }

    // =========================================================================
    // Parsing tests
    // =========================================================================

    #[test]
    fn test_partial_toml() {
        let text = r#"
            level = "warning"
            filter = "GPU,Pad*"

            [console]
            enabled = true
            timestamps = false

            [file]
            enabled = true
            path = "logs/app.log"
        "#;
        let config = LogConfig::from_toml_str(text, Path::new("inline")).unwrap();

        assert_eq!(config.level, Level::Warning);
        assert_eq!(config.filter, "GPU,Pad*");
        assert!(config.console.enabled);
        assert!(!config.console.timestamps);
        assert!(!config.debug.enabled);
        assert!(config.file.enabled);
        assert_eq!(config.file.path, Some(PathBuf::from("logs/app.log")));
        assert!(config.file.timestamps);
    }

    #[test]
    fn test_bad_level_is_parse_error() {
        let err = LogConfig::from_toml_str("level = \"loud\"", Path::new("bad.toml")).unwrap_err();
        match err {
            LogError::ConfigParse { path, .. } => assert_eq!(path, PathBuf::from("bad.toml")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = LogConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, LogError::ConfigRead { .. }));
    }

    #[test]
    fn test_toml_output_reparses() {
        let config = LogConfig {
            level: Level::Dev,
            filter: "SPU".into(),
            ..Default::default()
        };
        let text = config.to_toml();

        assert!(text.contains("level = \"dev\""));
        assert_eq!(LogConfig::from_toml_str(&text, Path::new("x")).unwrap(), config);
    }

    // =========================================================================
    // Apply / snapshot tests
    // =========================================================================

    #[test]
    fn test_apply_then_snapshot() {
        let dir = unique_temp_dir();
        let path = dir.join("app.log");
        let config = LogConfig {
            level: Level::Verbose,
            filter: "GPU".into(),
            console: ConsoleConfig {
                enabled: false,
                timestamps: false,
            },
            debug: DebugConfig::default(),
            file: FileConfig {
                enabled: true,
                path: Some(path.clone()),
                timestamps: false,
            },
        };

        let state = LogState::default();
        state.apply_config(&config);

        assert_eq!(state.config(), config);
        assert!(!state.is_log_visible(Level::Error, "GPU"));
        assert!(state.is_log_visible(Level::Verbose, "CPU"));

        state.set_file_output_params(false, None, false);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_from_file() {
        let dir = unique_temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("log.toml");
        fs::write(&path, "level = \"trace\"\n[debug]\nenabled = true\n").unwrap();

        let config = LogConfig::load(&path).unwrap();
        assert_eq!(config.level, Level::Trace);
        assert!(config.debug.enabled);

        let _ = fs::remove_dir_all(&dir);
    }
}
