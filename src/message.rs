//! Log message type
//!
//! A `LogMessage` only lives for the duration of one dispatch: it borrows the
//! caller's strings and is handed by reference to every enabled sink.

use crate::level::Level;
use std::fmt;

/// One visible message on its way to the sinks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogMessage<'a> {
    pub channel: &'a str,
    pub function: Option<&'a str>,
    pub level: Level,
    pub text: &'a str,
    /// Seconds since the owning state started
    pub timestamp: f64,
}

impl<'a> LogMessage<'a> {
    /// Render as a plain-text line (no trailing newline)
    ///
    /// `[   12.3456] [channel] [LEVEL] function: text` with timestamps,
    /// `[channel] [LEVEL] text` without.
    pub fn line(&self, timestamps: bool) -> LineDisplay<'_, 'a> {
        LineDisplay {
            message: self,
            timestamps,
        }
    }

    /// Function name, or empty when the message was written without one
    #[inline]
    pub fn function_or_empty(&self) -> &'a str {
        self.function.unwrap_or("")
    }
}

/// `Display` adapter returned by [`LogMessage::line`]
pub struct LineDisplay<'m, 'a> {
    message: &'m LogMessage<'a>,
    timestamps: bool,
}

impl fmt::Display for LineDisplay<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = self.message;
        if self.timestamps {
            write!(f, "[{:10.4}] ", msg.timestamp)?;
        }
        write!(f, "[{}] [{}] ", msg.channel, msg.level)?;
        if let Some(function) = msg.function.filter(|name| !name.is_empty()) {
            write!(f, "{}: ", function)?;
        }
        f.write_str(msg.text)
    }
}
