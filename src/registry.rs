//! Sink registry
//!
//! Owns the built-in sinks (console, debug, file) and the ordered list of
//! registered sinks. The owning `LogState` keeps the registry behind one
//! mutex, so configuration, registration and fan-out are serialized.

use crate::error::Result;
use crate::message::LogMessage;
use crate::sink::{
    CallbackSink, ConsoleSink, DebugSink, FileSink, LogCallback, LogSink, SinkId, SinkKey,
};
use std::io::Write;
use std::path::Path;

struct Registration {
    key: SinkKey,
    sink: Box<dyn LogSink>,
}

pub struct SinkRegistry {
    console: ConsoleSink,
    debug: DebugSink,
    file: FileSink,
    registrations: Vec<Registration>,
    next_id: u64,
    /// Set once a file open failure was announced on the console
    file_error_reported: bool,
}

impl SinkRegistry {
    /// Registry with every sink disabled and no registrations
    pub const fn new() -> Self {
        Self {
            console: ConsoleSink::new(),
            debug: DebugSink::new(),
            file: FileSink::new(),
            registrations: Vec::new(),
            next_id: 0,
            file_error_reported: false,
        }
    }

    /// Same as [`new`](Self::new), with console lines going to `writer`
    pub fn with_console_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            console: ConsoleSink::with_writer(writer),
            ..Self::new()
        }
    }

    // === Built-in sinks ===

    pub fn set_console_output_params(&mut self, enabled: bool, timestamps: bool) {
        self.console.configure(enabled, timestamps);
    }

    pub fn console(&self) -> &ConsoleSink {
        &self.console
    }

    pub fn set_debug_output_params(&mut self, enabled: bool) {
        self.debug.configure(enabled);
    }

    pub fn debug(&self) -> &DebugSink {
        &self.debug
    }

    /// Reconfigure the file sink. On error the sink is left disabled.
    pub fn set_file_output_params(
        &mut self,
        enabled: bool,
        path: Option<&Path>,
        timestamps: bool,
    ) -> Result<()> {
        self.file.configure(enabled, path, timestamps)?;
        if self.file.is_enabled() {
            self.file_error_reported = false;
        }
        Ok(())
    }

    pub fn file(&self) -> &FileSink {
        &self.file
    }

    /// True the first time a file open failure can be announced
    ///
    /// Only consumed while the console is enabled, so a failure that
    /// nobody saw is still reported once the console comes up.
    pub fn take_file_error_report(&mut self) -> bool {
        if !self.console.is_enabled() {
            return false;
        }
        !std::mem::replace(&mut self.file_error_reported, true)
    }

    /// Write a message to the console sink only
    pub fn write_console(&mut self, message: &LogMessage<'_>) {
        self.console.write(message);
    }

    // === Registrations ===

    /// Register a `(callback, user)` pair. Returns false if it already was.
    pub fn register_callback(&mut self, callback: LogCallback, user: usize) -> bool {
        let sink = CallbackSink::new(callback, user);
        let key = sink.key();
        if self.registrations.iter().any(|r| r.key == key) {
            return false;
        }
        self.registrations.push(Registration {
            key,
            sink: Box::new(sink),
        });
        true
    }

    /// Remove a `(callback, user)` pair. Returns false if it was not registered.
    pub fn unregister_callback(&mut self, callback: LogCallback, user: usize) -> bool {
        self.remove(CallbackSink::new(callback, user).key())
    }

    pub fn register_sink(&mut self, sink: Box<dyn LogSink>) -> SinkId {
        let id = SinkId::new(self.next_id);
        self.next_id += 1;
        self.registrations.push(Registration {
            key: SinkKey::Boxed(id),
            sink,
        });
        id
    }

    pub fn unregister_sink(&mut self, id: SinkId) -> bool {
        self.remove(SinkKey::Boxed(id))
    }

    /// Number of registered (non built-in) sinks
    pub fn registered_count(&self) -> usize {
        self.registrations.len()
    }

    fn remove(&mut self, key: SinkKey) -> bool {
        match self.registrations.iter().position(|r| r.key == key) {
            Some(index) => {
                // `remove` keeps registration order for the survivors.
                let mut registration = self.registrations.remove(index);
                registration.sink.flush();
                true
            }
            None => false,
        }
    }

    // === Fan-out ===

    /// Deliver a visible message: console, debug, file, then registrations
    pub fn dispatch(&mut self, message: &LogMessage<'_>) {
        self.console.write(message);
        self.debug.write(message);
        self.file.write(message);
        for registration in &mut self.registrations {
            registration.sink.write(message);
        }
    }

    pub fn flush(&mut self) {
        self.console.flush();
        self.file.flush();
        for registration in &mut self.registrations {
            registration.sink.flush();
        }
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}
