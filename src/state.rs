//! Logging state and dispatcher
//!
//! `LogState` is the one aggregate holding every piece of mutable logging
//! state: threshold, channel filter, sink configuration and registrations.
//! The process-wide instance lives in [`crate::global`]; independent
//! instances can be created for embedding or tests.
//!
//! # Concurrency
//!
//! - The threshold is an `AtomicU8`: the fast path is one relaxed load and a
//!   compare.
//! - The channel filter sits behind an `RwLock`, but readers first check an
//!   `AtomicBool` and skip the lock entirely while no filter is set.
//! - The sink registry sits behind a `Mutex` held for configuration changes
//!   and for the whole fan-out of one message. Lines never interleave within
//!   a sink, and a sink is never called after its unregistration returned.

use crate::channel::ChannelFilter;
use crate::constants::LOG_CHANNEL;
use crate::level::Level;
use crate::message::LogMessage;
use crate::platform;
use crate::registry::SinkRegistry;
use crate::sink::{LogCallback, LogSink, SinkId};
use parking_lot::{const_mutex, const_rwlock, Mutex, RwLock};
use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::warn;

thread_local! {
    /// Addresses of the states this thread is currently dispatching through
    static DISPATCHING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks `state` as dispatching on this thread; `None` if it already is
struct DispatchGuard(usize);

impl DispatchGuard {
    fn enter(state: &LogState) -> Option<Self> {
        let key = state as *const LogState as usize;
        DISPATCHING.with(|active| {
            let mut active = active.borrow_mut();
            if active.contains(&key) {
                None
            } else {
                active.push(key);
                Some(DispatchGuard(key))
            }
        })
    }
}

impl Drop for DispatchGuard {
    fn drop(&mut self) {
        DISPATCHING.with(|active| active.borrow_mut().retain(|&key| key != self.0));
    }
}

pub struct LogState {
    threshold: AtomicU8,
    filter_active: AtomicBool,
    filter: RwLock<ChannelFilter>,
    sinks: Mutex<SinkRegistry>,
    start: OnceLock<Instant>,
}

impl LogState {
    /// Fresh state: default threshold, no filter, every sink disabled
    ///
    /// `const` so the process-wide instance needs no runtime init. The clock
    /// starts on first use.
    pub const fn new() -> Self {
        Self::with_registry(SinkRegistry::new())
    }

    /// Fresh state whose console sink writes to `writer` instead of stdout
    pub fn with_console_writer(writer: Box<dyn Write + Send>) -> Self {
        let state = Self::with_registry(SinkRegistry::with_console_writer(writer));
        state.clock();
        state
    }

    const fn with_registry(registry: SinkRegistry) -> Self {
        Self {
            threshold: AtomicU8::new(Level::DEFAULT_THRESHOLD as u8),
            filter_active: AtomicBool::new(false),
            filter: const_rwlock(ChannelFilter::empty()),
            sinks: const_mutex(registry),
            start: OnceLock::new(),
        }
    }

    fn clock(&self) -> Instant {
        *self.start.get_or_init(Instant::now)
    }

    // =========================================================================
    // Severity
    // =========================================================================

    pub fn log_level(&self) -> Level {
        Level::from_u8(self.threshold.load(Ordering::Relaxed))
    }

    /// `Level::None` silences everything
    pub fn set_log_level(&self, level: Level) {
        self.threshold.store(level as u8, Ordering::Relaxed);
    }

    /// Fast path: level check only, no filter, no locks
    #[inline(always)]
    pub fn is_level_enabled(&self, level: Level) -> bool {
        level as u8 <= self.threshold.load(Ordering::Relaxed)
    }

    // =========================================================================
    // Channel filter
    // =========================================================================

    /// Current filter spec, as last set
    pub fn log_filter(&self) -> String {
        self.filter.read().spec().to_string()
    }

    /// Replace the channel filter (see [`crate::channel`] for the syntax)
    pub fn set_log_filter(&self, spec: &str) {
        self.clock();
        let mut filter = self.filter.write();
        if filter.spec() == spec {
            return;
        }
        *filter = ChannelFilter::parse(spec);
        self.filter_active.store(!filter.is_empty(), Ordering::Release);
    }

    /// Full visibility check: level, then channel
    pub fn is_log_visible(&self, level: Level, channel: &str) -> bool {
        if !level.passes(self.log_level()) {
            return false;
        }
        if !self.filter_active.load(Ordering::Acquire) {
            return true;
        }
        !self.filter.read().is_suppressed(channel)
    }

    // =========================================================================
    // Built-in sinks
    // =========================================================================

    pub fn set_console_output_params(&self, enabled: bool, timestamps: bool) {
        self.clock();
        self.sinks.lock().set_console_output_params(enabled, timestamps);
    }

    pub fn is_console_output_enabled(&self) -> bool {
        self.sinks.lock().console().is_enabled()
    }

    /// Whether a console is attached at all, regardless of configuration
    pub fn is_console_output_currently_available(&self) -> bool {
        platform::console_available()
    }

    pub fn set_debug_output_params(&self, enabled: bool) {
        self.clock();
        self.sinks.lock().set_debug_output_params(enabled);
    }

    pub fn is_debug_output_enabled(&self) -> bool {
        self.sinks.lock().debug().is_enabled()
    }

    /// Enable, retarget or disable the file sink
    ///
    /// Never fails from the caller's point of view: if the file cannot be
    /// opened the sink stays disabled and the problem is reported once on the
    /// console (when enabled) and through `tracing`.
    pub fn set_file_output_params(&self, enabled: bool, path: Option<&Path>, timestamps: bool) {
        let start = self.clock();
        let mut sinks = self.sinks.lock();
        let Err(err) = sinks.set_file_output_params(enabled, path, timestamps) else {
            return;
        };

        warn!(error = %err, "file log output disabled");
        if sinks.take_file_error_report() {
            let text = err.to_string();
            sinks.write_console(&LogMessage {
                channel: LOG_CHANNEL.as_str(),
                function: None,
                level: Level::Error,
                text: &text,
                timestamp: start.elapsed().as_secs_f64(),
            });
        }
    }

    pub fn is_file_output_enabled(&self) -> bool {
        self.sinks.lock().file().is_enabled()
    }

    /// Path of the open log file, if any
    pub fn file_output_path(&self) -> Option<PathBuf> {
        self.sinks.lock().file().path().map(Path::to_path_buf)
    }

    pub(crate) fn with_sinks<R>(&self, f: impl FnOnce(&SinkRegistry) -> R) -> R {
        f(&self.sinks.lock())
    }

    // =========================================================================
    // Registered sinks
    // =========================================================================

    /// Register a callback; registering the same pair twice is a no-op
    pub fn register_callback(&self, callback: LogCallback, user: usize) {
        self.clock();
        self.sinks.lock().register_callback(callback, user);
    }

    /// Unregister a callback; unknown pairs are ignored
    ///
    /// Once this returns the callback will not be invoked again.
    pub fn unregister_callback(&self, callback: LogCallback, user: usize) {
        self.sinks.lock().unregister_callback(callback, user);
    }

    pub fn register_sink(&self, sink: Box<dyn LogSink>) -> SinkId {
        self.clock();
        self.sinks.lock().register_sink(sink)
    }

    pub fn unregister_sink(&self, id: SinkId) {
        self.sinks.lock().unregister_sink(id);
    }

    /// Number of registered callbacks and sinks
    pub fn registered_sink_count(&self) -> usize {
        self.sinks.lock().registered_count()
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    pub fn write(&self, channel: &str, level: Level, message: &str) {
        if self.is_log_visible(level, channel) {
            self.dispatch(channel, None, level, message);
        }
    }

    pub fn write_function(&self, channel: &str, function: &str, level: Level, message: &str) {
        if self.is_log_visible(level, channel) {
            self.dispatch(channel, Some(function), level, message);
        }
    }

    /// Formatted write; arguments are rendered only if the message is visible
    pub fn write_fmt(&self, channel: &str, level: Level, args: fmt::Arguments<'_>) {
        if self.is_log_visible(level, channel) {
            self.dispatch_args(channel, None, level, args);
        }
    }

    pub fn write_function_fmt(
        &self,
        channel: &str,
        function: &str,
        level: Level,
        args: fmt::Arguments<'_>,
    ) {
        if self.is_log_visible(level, channel) {
            self.dispatch_args(channel, Some(function), level, args);
        }
    }

    fn dispatch_args(
        &self,
        channel: &str,
        function: Option<&str>,
        level: Level,
        args: fmt::Arguments<'_>,
    ) {
        match args.as_str() {
            Some(text) => self.dispatch(channel, function, level, text),
            None => self.dispatch(channel, function, level, &args.to_string()),
        }
    }

    fn dispatch(&self, channel: &str, function: Option<&str>, level: Level, text: &str) {
        let Some(_guard) = DispatchGuard::enter(self) else {
            return;
        };

        let start = self.clock();
        let mut sinks = self.sinks.lock();
        // Timestamp under the lock so each sink sees them in order.
        let message = LogMessage {
            channel,
            function,
            level,
            text,
            timestamp: start.elapsed().as_secs_f64(),
        };
        sinks.dispatch(&message);
    }

    /// Seconds since this state started
    pub fn current_message_time(&self) -> f64 {
        self.clock().elapsed().as_secs_f64()
    }

    /// Flush console, file and registered sinks
    pub fn flush(&self) {
        self.sinks.lock().flush();
    }
}

impl Default for LogState {
    fn default() -> Self {
        let state = Self::new();
        state.clock();
        state
    }
}
