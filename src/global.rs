//! Process-wide logging state
//!
//! One `static` [`LogState`], built in a `const` context so it is usable from
//! the first instruction of `main` without an init call. Every function here
//! forwards to it; use [`global`] to reach it as a value.

use crate::level::Level;
use crate::sink::{LogCallback, LogSink, SinkId};
use crate::state::LogState;
use std::fmt;
use std::path::{Path, PathBuf};

static GLOBAL: LogState = LogState::new();

/// The process-wide state
#[inline]
pub fn global() -> &'static LogState {
    &GLOBAL
}

pub fn log_level() -> Level {
    GLOBAL.log_level()
}

pub fn set_log_level(level: Level) {
    GLOBAL.set_log_level(level);
}

/// Fast path used by the logging macros
#[inline(always)]
pub fn is_level_enabled(level: Level) -> bool {
    GLOBAL.is_level_enabled(level)
}

pub fn log_filter() -> String {
    GLOBAL.log_filter()
}

pub fn set_log_filter(spec: &str) {
    GLOBAL.set_log_filter(spec);
}

pub fn is_log_visible(level: Level, channel: &str) -> bool {
    GLOBAL.is_log_visible(level, channel)
}

pub fn set_console_output_params(enabled: bool, timestamps: bool) {
    GLOBAL.set_console_output_params(enabled, timestamps);
}

pub fn is_console_output_enabled() -> bool {
    GLOBAL.is_console_output_enabled()
}

pub fn is_console_output_currently_available() -> bool {
    GLOBAL.is_console_output_currently_available()
}

pub fn set_debug_output_params(enabled: bool) {
    GLOBAL.set_debug_output_params(enabled);
}

pub fn is_debug_output_enabled() -> bool {
    GLOBAL.is_debug_output_enabled()
}

pub fn set_file_output_params(enabled: bool, path: Option<&Path>, timestamps: bool) {
    GLOBAL.set_file_output_params(enabled, path, timestamps);
}

pub fn is_file_output_enabled() -> bool {
    GLOBAL.is_file_output_enabled()
}

pub fn file_output_path() -> Option<PathBuf> {
    GLOBAL.file_output_path()
}

pub fn register_callback(callback: LogCallback, user: usize) {
    GLOBAL.register_callback(callback, user);
}

pub fn unregister_callback(callback: LogCallback, user: usize) {
    GLOBAL.unregister_callback(callback, user);
}

pub fn register_sink(sink: Box<dyn LogSink>) -> SinkId {
    GLOBAL.register_sink(sink)
}

pub fn unregister_sink(id: SinkId) {
    GLOBAL.unregister_sink(id);
}

pub fn write(channel: &str, level: Level, message: &str) {
    GLOBAL.write(channel, level, message);
}

pub fn write_function(channel: &str, function: &str, level: Level, message: &str) {
    GLOBAL.write_function(channel, function, level, message);
}

pub fn write_fmt(channel: &str, level: Level, args: fmt::Arguments<'_>) {
    GLOBAL.write_fmt(channel, level, args);
}

pub fn write_function_fmt(channel: &str, function: &str, level: Level, args: fmt::Arguments<'_>) {
    GLOBAL.write_function_fmt(channel, function, level, args);
}

/// Seconds since the process-wide state was first used
pub fn current_message_time() -> f64 {
    GLOBAL.current_message_time()
}

pub fn flush() {
    GLOBAL.flush();
}
