//! Sink abstraction
//!
//! Every destination, built-in or registered, implements [`LogSink`]. Plain
//! function callbacks are wrapped by [`CallbackSink`] so the registry never
//! special-cases them.

pub mod console;
pub mod debug;
pub mod file;
pub mod tracing_adapter;

use crate::level::Level;
use crate::message::LogMessage;

pub use console::ConsoleSink;
pub use debug::DebugSink;
pub use file::FileSink;
pub use tracing_adapter::TracingSink;

/// A destination for visible messages
///
/// Called with the registry lock held, so writes to one sink never
/// interleave. Implementations must not log through, or reconfigure, the
/// state that is dispatching to them: nested messages from the dispatching
/// thread are dropped and reconfiguration would deadlock. Forwarding to a
/// different `LogState` is fine as long as no cycle of states forms.
pub trait LogSink: Send {
    /// Consume one message. Failures are the sink's own business.
    fn write(&mut self, message: &LogMessage<'_>);

    /// Push buffered output to its destination
    fn flush(&mut self) {}
}

/// Plain callback signature: `(user, channel, function-or-empty, level, message)`
///
/// `user` is an opaque token chosen at registration (an index, an address,
/// a handle...) and handed back unchanged.
pub type LogCallback = fn(user: usize, channel: &str, function: &str, level: Level, message: &str);

/// Adapter turning a `(callback, user)` pair into a [`LogSink`]
#[derive(Debug, Clone, Copy)]
pub struct CallbackSink {
    callback: LogCallback,
    user: usize,
}

impl CallbackSink {
    pub fn new(callback: LogCallback, user: usize) -> Self {
        Self { callback, user }
    }

    /// Identity of the registration
    pub(crate) fn key(&self) -> SinkKey {
        SinkKey::Callback {
            callback: self.callback as usize,
            user: self.user,
        }
    }
}

impl LogSink for CallbackSink {
    fn write(&mut self, message: &LogMessage<'_>) {
        (self.callback)(
            self.user,
            message.channel,
            message.function_or_empty(),
            message.level,
            message.text,
        );
    }
}

/// Handle returned when registering a boxed sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkId(u64);

impl SinkId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Registry key: callback registrations are unique per `(callback, user)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SinkKey {
    Callback { callback: usize, user: usize },
    Boxed(SinkId),
}
