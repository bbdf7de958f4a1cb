//! Tracing bridge sink
//!
//! Forwards dispatched messages into the `tracing` ecosystem so applications
//! that already run a subscriber see channel-filtered messages there too.

use super::LogSink;
use crate::level::Level;
use crate::message::LogMessage;

/// Sink that re-emits every message as a `tracing` event
///
/// Level mapping: Error -> ERROR, Warning -> WARN, Info -> INFO,
/// Verbose/Dev -> DEBUG, Debug/Trace -> TRACE.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&mut self, message: &LogMessage<'_>) {
        let channel = message.channel;
        let function = message.function_or_empty();
        let text = message.text;

        match message.level {
            Level::Error => tracing::error!(channel, function, "{}", text),
            Level::Warning => tracing::warn!(channel, function, "{}", text),
            Level::Info => tracing::info!(channel, function, "{}", text),
            Level::Verbose | Level::Dev => tracing::debug!(channel, function, "{}", text),
            Level::Debug | Level::Trace => tracing::trace!(channel, function, "{}", text),
            Level::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarding_without_subscriber_is_silent() {
        let mut sink = TracingSink;
        for level in Level::ALL {
            sink.write(&LogMessage {
                channel: "core",
                function: Some("boot"),
                level,
                text: "message",
                timestamp: 0.0,
            });
        }
    }
}
