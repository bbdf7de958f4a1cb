//! Console sink
//!
//! Writes rendered lines to stdout, colored per level when stdout is a
//! terminal. Embedders and tests can redirect it to any writer.

use super::LogSink;
use crate::level::Level;
use crate::message::LogMessage;
use crate::platform;
use crossterm::style::{style, Color, Stylize};
use std::io::{self, Write};

/// Where console lines go
pub enum ConsoleTarget {
    Stdout,
    Writer(Box<dyn Write + Send>),
}

pub struct ConsoleSink {
    enabled: bool,
    timestamps: bool,
    colored: bool,
    target: ConsoleTarget,
}

impl ConsoleSink {
    /// Disabled console sink bound to stdout
    pub const fn new() -> Self {
        Self {
            enabled: false,
            timestamps: true,
            colored: false,
            target: ConsoleTarget::Stdout,
        }
    }

    /// Disabled console sink bound to an arbitrary writer (never colored)
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            target: ConsoleTarget::Writer(writer),
            ..Self::new()
        }
    }

    pub fn configure(&mut self, enabled: bool, timestamps: bool) {
        self.enabled = enabled;
        self.timestamps = timestamps;
        self.colored = enabled
            && matches!(self.target, ConsoleTarget::Stdout)
            && platform::stdout_is_terminal();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn timestamps(&self) -> bool {
        self.timestamps
    }

    fn write_line(&mut self, message: &LogMessage<'_>) -> io::Result<()> {
        let line = message.line(self.timestamps);
        // Render first so the line reaches the target in a single write.
        let text = match level_color(message.level) {
            Some(color) if self.colored => format!("{}\n", style(line).with(color)),
            _ => format!("{}\n", line),
        };
        match &mut self.target {
            ConsoleTarget::Stdout => io::stdout().lock().write_all(text.as_bytes()),
            ConsoleTarget::Writer(writer) => writer.write_all(text.as_bytes()),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for ConsoleSink {
    fn write(&mut self, message: &LogMessage<'_>) {
        if !self.enabled {
            return;
        }
        // A detached console just drops the line.
        let _ = self.write_line(message);
    }

    fn flush(&mut self) {
        let _ = match &mut self.target {
            ConsoleTarget::Stdout => io::stdout().flush(),
            ConsoleTarget::Writer(writer) => writer.flush(),
        };
    }
}

/// Terminal color per level (`None` = terminal default)
fn level_color(level: Level) -> Option<Color> {
    match level {
        Level::Error => Some(Color::Red),
        Level::Warning => Some(Color::Yellow),
        Level::Info | Level::None => None,
        Level::Verbose => Some(Color::Grey),
        Level::Dev => Some(Color::Green),
        Level::Debug => Some(Color::Cyan),
        Level::Trace => Some(Color::DarkGrey),
    }
}
