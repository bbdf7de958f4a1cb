//! Command-line interface definition using clap
//!
//! Provides structured argument parsing with automatic help generation.

use chanlog::constants::DEFAULT_CLI_CHANNEL;
use chanlog::config::ConsoleConfig;
use chanlog::{Level, LogConfig};
use clap::Parser;
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Write messages through the chanlog dispatcher
///
/// Messages come from the positional arguments, or from stdin (one per line)
/// when none are given.
#[derive(Parser, Debug, Default)]
#[command(name = "chanlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose internal diagnostics (stderr)
    #[arg(short, long)]
    pub verbose: bool,

    /// TOML config file to start from
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Threshold: none, error, warning, info, verbose, dev, debug, trace
    #[arg(long, value_name = "LEVEL")]
    pub level: Option<Level>,

    /// Channel filter, e.g. "GPU,Pad*"
    #[arg(long, value_name = "SPEC")]
    pub filter: Option<String>,

    /// Enable console output
    #[arg(long, overrides_with = "no_console")]
    pub console: bool,

    /// Disable console output
    #[arg(long, overrides_with = "console")]
    pub no_console: bool,

    /// Prefix console lines with timestamps
    #[arg(long, overrides_with = "no_timestamps")]
    pub timestamps: bool,

    /// Omit console timestamps
    #[arg(long, overrides_with = "timestamps")]
    pub no_timestamps: bool,

    /// Send messages to the platform debug output
    #[arg(long, overrides_with = "no_debug_output")]
    pub debug_output: bool,

    /// Stop sending messages to the platform debug output
    #[arg(long, overrides_with = "debug_output")]
    pub no_debug_output: bool,

    /// Append messages to this file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Channel to write on
    #[arg(long, default_value = DEFAULT_CLI_CHANNEL)]
    pub channel: String,

    /// Severity of the written messages
    #[arg(short, long, value_name = "LEVEL", default_value = "info")]
    pub severity: Level,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Messages to write
    pub messages: Vec<String>,
}

/// `Some(true)` for `--x`, `Some(false)` for `--no-x`, `None` if neither
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl Cli {
    /// Starting point when no config file is given: console on, no timestamps
    pub fn default_config() -> LogConfig {
        LogConfig {
            console: ConsoleConfig {
                enabled: true,
                timestamps: false,
            },
            ..LogConfig::default()
        }
    }

    /// Layer command-line overrides on top of `base`
    ///
    /// Settings without a matching flag keep the value from `base`.
    pub fn apply_overrides(&self, mut base: LogConfig) -> LogConfig {
        if let Some(level) = self.level {
            base.level = level;
        }
        if let Some(filter) = &self.filter {
            base.filter = filter.clone();
        }
        if let Some(enabled) = switch(self.console, self.no_console) {
            base.console.enabled = enabled;
        }
        if let Some(timestamps) = switch(self.timestamps, self.no_timestamps) {
            base.console.timestamps = timestamps;
        }
        if let Some(enabled) = switch(self.debug_output, self.no_debug_output) {
            base.debug.enabled = enabled;
        }
        if let Some(path) = &self.file {
            base.file.enabled = true;
            base.file.path = Some(path.clone());
        }
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults_enable_console_without_timestamps() {
        let cli = Cli::parse_from(["chanlog", "hello"]);
        let config = cli.apply_overrides(Cli::default_config());

        assert_eq!(cli.channel, DEFAULT_CLI_CHANNEL);
        assert_eq!(cli.severity, Level::Info);
        assert_eq!(cli.messages, vec!["hello".to_string()]);
        assert!(config.console.enabled);
        assert!(!config.console.timestamps);
    }

    fn loaded_config() -> LogConfig {
        LogConfig::from_toml_str(
            r#"
                level = "verbose"
                filter = "GPU"

                [console]
                enabled = false
                timestamps = true

                [debug]
                enabled = true
            "#,
            Path::new("loaded.toml"),
        )
        .unwrap()
    }

    #[test]
    fn test_no_flags_keep_config_file_values() {
        let cli = Cli::parse_from(["chanlog", "msg"]);
        assert_eq!(cli.apply_overrides(loaded_config()), loaded_config());
    }

    #[test]
    fn test_flags_flip_config_file_values_both_ways() {
        let cli = Cli::parse_from([
            "chanlog",
            "--console",
            "--no-timestamps",
            "--no-debug-output",
        ]);
        let config = cli.apply_overrides(loaded_config());

        assert!(config.console.enabled);
        assert!(!config.console.timestamps);
        assert!(!config.debug.enabled);
        assert_eq!(config.level, Level::Verbose);
        assert_eq!(config.filter, "GPU");
    }

    #[test]
    fn test_last_of_a_flag_pair_wins() {
        let cli = Cli::parse_from(["chanlog", "--no-console", "--console"]);
        assert!(cli.apply_overrides(loaded_config()).console.enabled);

        let cli = Cli::parse_from(["chanlog", "--timestamps", "--no-timestamps"]);
        assert!(!cli.apply_overrides(loaded_config()).console.timestamps);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "chanlog",
            "--level",
            "trace",
            "--filter",
            "GPU",
            "--no-console",
            "--file",
            "out.log",
            "--severity",
            "warning",
            "--channel",
            "core",
        ]);
        let config = cli.apply_overrides(Cli::default_config());

        assert_eq!(config.level, Level::Trace);
        assert_eq!(config.filter, "GPU");
        assert!(!config.console.enabled);
        assert!(config.file.enabled);
        assert_eq!(config.file.path, Some(PathBuf::from("out.log")));
        assert_eq!(cli.severity, Level::Warning);
        assert_eq!(cli.channel, "core");
        assert!(cli.messages.is_empty());
    }

    #[test]
    fn test_bad_level_is_rejected() {
        assert!(Cli::try_parse_from(["chanlog", "--level", "loud"]).is_err());
    }
}
