//! Crate-wide constants

use crate::channel::Channel;

/// Channel used for the facility's own diagnostics (e.g. file open failures)
pub const LOG_CHANNEL: Channel = Channel::new("Log");

/// Default console timestamps setting
pub const DEFAULT_CONSOLE_TIMESTAMPS: bool = true;

/// Default file timestamps setting
pub const DEFAULT_FILE_TIMESTAMPS: bool = true;

/// Channel used by the `chanlog` binary when none is given
pub const DEFAULT_CLI_CHANNEL: &str = "chanlog";
