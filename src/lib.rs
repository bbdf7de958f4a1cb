//! chanlog - process-wide log dispatch
//!
//! Every message goes through one [`LogState`]: it is filtered by severity
//! ([`Level`]) and by channel ([`ChannelFilter`]), then fanned out to the
//! enabled sinks: console, platform debug output, file, and any registered
//! callbacks or [`LogSink`]s.
//!
//! The process-wide state is reached through the free functions re-exported
//! here (`set_log_level`, `write`, ...) and the call-site macros
//! ([`error_log!`], [`info_log!`], ...). Suppressed messages cost one atomic
//! load and a compare.
//!
//! ```
//! use chanlog::{info_log, Channel, Level};
//!
//! const LOG: Channel = Channel::new("core");
//!
//! chanlog::set_log_level(Level::Info);
//! chanlog::set_console_output_params(true, false);
//! info_log!(LOG, "booted in {} ms", 42);
//! ```

pub mod channel;
pub mod config;
pub mod constants;
pub mod error;
pub mod level;
pub mod message;
pub mod sink;
pub mod state;

mod global;
mod macros;
mod platform;
mod registry;

pub use channel::{Channel, ChannelFilter};
pub use config::LogConfig;
pub use error::{LogError, Result};
pub use global::*;
pub use level::Level;
pub use message::LogMessage;
pub use sink::{CallbackSink, LogCallback, LogSink, SinkId, TracingSink};
pub use state::LogState;

#[doc(hidden)]
pub use macros::__private;

/// Initialize tracing for the facility's own diagnostics
///
/// Call early in main() before any logging occurs.
/// Set `verbose` to true for debug-level output. `RUST_LOG` overrides both.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(false)
                .compact(),
        )
        .with(filter)
        .try_init();
}
