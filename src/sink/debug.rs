//! Platform debug output sink

use super::LogSink;
use crate::message::LogMessage;
use crate::platform;

#[derive(Debug, Default)]
pub struct DebugSink {
    enabled: bool,
}

impl DebugSink {
    pub const fn new() -> Self {
        Self { enabled: false }
    }

    pub fn configure(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl LogSink for DebugSink {
    fn write(&mut self, message: &LogMessage<'_>) {
        if self.enabled {
            platform::write_debug_output(message.line(false));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_sink_toggles() {
        let mut sink = DebugSink::new();
        assert!(!sink.is_enabled());

        sink.configure(true);
        assert!(sink.is_enabled());

        sink.configure(false);
        assert!(!sink.is_enabled());
    }

    #[test]
    fn test_enabled_sink_renders_line_for_platform() {
        let mut sink = DebugSink::new();
        sink.configure(true);

        for text in ["mounted", "bad\0line"] {
            sink.write(&LogMessage {
                channel: "disk",
                function: Some("mount"),
                level: crate::level::Level::Info,
                text,
                timestamp: 1.0,
            });
        }
    }
}
