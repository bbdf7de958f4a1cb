//! Call-site logging macros
//!
//! Every macro runs the fast path first: one atomic load and a compare. The
//! channel expression and the format arguments are only evaluated when the
//! level passes, so a suppressed message costs no formatting at all.
//!
//! Each macro takes the channel explicitly (a [`Channel`](crate::Channel)
//! constant or anything `AsRef<str>`) and targets the process-wide state.
//! Prefix with `in state,` to target a specific [`LogState`](crate::LogState):
//!
//! ```
//! use chanlog::{error_log, info_log, Channel, Level, LogState};
//!
//! const LOG: Channel = Channel::new("CDROM");
//!
//! let state = LogState::default();
//! state.set_log_level(Level::Info);
//! info_log!(in state, LOG, "read {} sectors", 16);
//! error_log!(LOG, "lid opened during read");
//! ```
//!
//! `error_log!` and `warning_log!` attach the calling function's name.
//! `debug_log!` and `trace_log!` compile to nothing without `debug_assertions`.

/// Log at an explicit level
#[macro_export]
macro_rules! log_at {
    (in $state:expr, $channel:expr, $level:expr, $($arg:tt)+) => {{
        let __state: &$crate::LogState = &$state;
        let __level: $crate::Level = $level;
        if __state.is_level_enabled(__level) {
            __state.write_fmt(
                ::core::convert::AsRef::<str>::as_ref(&$channel),
                __level,
                ::core::format_args!($($arg)+),
            );
        }
    }};
    ($channel:expr, $level:expr, $($arg:tt)+) => {{
        let __level: $crate::Level = $level;
        if $crate::is_level_enabled(__level) {
            $crate::write_fmt(
                ::core::convert::AsRef::<str>::as_ref(&$channel),
                __level,
                ::core::format_args!($($arg)+),
            );
        }
    }};
}

/// Log at an explicit level, tagging the calling function
#[macro_export]
macro_rules! log_function_at {
    (in $state:expr, $channel:expr, $level:expr, $($arg:tt)+) => {{
        let __state: &$crate::LogState = &$state;
        let __level: $crate::Level = $level;
        if __state.is_level_enabled(__level) {
            __state.write_function_fmt(
                ::core::convert::AsRef::<str>::as_ref(&$channel),
                $crate::__function_name!(),
                __level,
                ::core::format_args!($($arg)+),
            );
        }
    }};
    ($channel:expr, $level:expr, $($arg:tt)+) => {{
        let __level: $crate::Level = $level;
        if $crate::is_level_enabled(__level) {
            $crate::write_function_fmt(
                ::core::convert::AsRef::<str>::as_ref(&$channel),
                $crate::__function_name!(),
                __level,
                ::core::format_args!($($arg)+),
            );
        }
    }};
}

#[macro_export]
macro_rules! error_log {
    (in $state:expr, $channel:expr, $($arg:tt)+) => {
        $crate::log_function_at!(in $state, $channel, $crate::Level::Error, $($arg)+)
    };
    ($channel:expr, $($arg:tt)+) => {
        $crate::log_function_at!($channel, $crate::Level::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! warning_log {
    (in $state:expr, $channel:expr, $($arg:tt)+) => {
        $crate::log_function_at!(in $state, $channel, $crate::Level::Warning, $($arg)+)
    };
    ($channel:expr, $($arg:tt)+) => {
        $crate::log_function_at!($channel, $crate::Level::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! info_log {
    (in $state:expr, $channel:expr, $($arg:tt)+) => {
        $crate::log_at!(in $state, $channel, $crate::Level::Info, $($arg)+)
    };
    ($channel:expr, $($arg:tt)+) => {
        $crate::log_at!($channel, $crate::Level::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! verbose_log {
    (in $state:expr, $channel:expr, $($arg:tt)+) => {
        $crate::log_at!(in $state, $channel, $crate::Level::Verbose, $($arg)+)
    };
    ($channel:expr, $($arg:tt)+) => {
        $crate::log_at!($channel, $crate::Level::Verbose, $($arg)+)
    };
}

#[macro_export]
macro_rules! dev_log {
    (in $state:expr, $channel:expr, $($arg:tt)+) => {
        $crate::log_at!(in $state, $channel, $crate::Level::Dev, $($arg)+)
    };
    ($channel:expr, $($arg:tt)+) => {
        $crate::log_at!($channel, $crate::Level::Dev, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug_log {
    (in $state:expr, $channel:expr, $($arg:tt)+) => {
        if ::core::cfg!(debug_assertions) {
            $crate::log_at!(in $state, $channel, $crate::Level::Debug, $($arg)+)
        }
    };
    ($channel:expr, $($arg:tt)+) => {
        if ::core::cfg!(debug_assertions) {
            $crate::log_at!($channel, $crate::Level::Debug, $($arg)+)
        }
    };
}

#[macro_export]
macro_rules! trace_log {
    (in $state:expr, $channel:expr, $($arg:tt)+) => {
        if ::core::cfg!(debug_assertions) {
            $crate::log_at!(in $state, $channel, $crate::Level::Trace, $($arg)+)
        }
    };
    ($channel:expr, $($arg:tt)+) => {
        if ::core::cfg!(debug_assertions) {
            $crate::log_at!($channel, $crate::Level::Trace, $($arg)+)
        }
    };
}

/// Name of the enclosing function (last path segment, closures skipped)
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::__private::function_name_from_path(__type_name_of(__here))
    }};
}

/// Helpers used by macro expansions; not public API
#[doc(hidden)]
pub mod __private {
    /// `a::b::func::__here` -> `func`, skipping `{{closure}}` segments
    pub fn function_name_from_path(path: &'static str) -> &'static str {
        let path = path.strip_suffix("::__here").unwrap_or(path);
        let mut path = path;
        while let Some(stripped) = path.strip_suffix("::{{closure}}") {
            path = stripped;
        }
        match path.rfind("::") {
            Some(pos) => &path[pos + 2..],
            None => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::__private::function_name_from_path;
    use crate::{Channel, Level, LogMessage, LogSink, LogState};
    use parking_lot::Mutex;
    use std::cell::Cell;
    use std::sync::Arc;

    const LOG: Channel = Channel::new("macro");

    struct Capture(Arc<Mutex<Vec<(Level, String, String)>>>);

    impl LogSink for Capture {
        fn write(&mut self, message: &LogMessage<'_>) {
            self.0.lock().push((
                message.level,
                message.function_or_empty().to_string(),
                message.text.to_string(),
            ));
        }
    }

    fn capture_state(level: Level) -> (LogState, Arc<Mutex<Vec<(Level, String, String)>>>) {
        let out = Arc::new(Mutex::new(Vec::new()));
        let state = LogState::default();
        state.set_log_level(level);
        state.register_sink(Box::new(Capture(out.clone())));
        (state, out)
    }

    #[test]
    fn test_function_name_from_path() {
        assert_eq!(function_name_from_path("app::disk::open::__here"), "open");
        assert_eq!(
            function_name_from_path("app::disk::open::{{closure}}::{{closure}}::__here"),
            "open"
        );
        assert_eq!(function_name_from_path("main::__here"), "main");
    }

    #[test]
    fn test_error_log_attaches_function_name() {
        let (state, out) = capture_state(Level::Info);

        error_log!(in state, LOG, "code {}", 5);
        info_log!(in state, LOG, "plain");

        assert_eq!(
            out.lock().as_slice(),
            &[
                (
                    Level::Error,
                    "test_error_log_attaches_function_name".to_string(),
                    "code 5".to_string()
                ),
                (Level::Info, String::new(), "plain".to_string()),
            ]
        );
    }

    #[test]
    fn test_suppressed_macro_does_not_evaluate_arguments() {
        let (state, out) = capture_state(Level::Warning);
        let evaluated = Cell::new(0);
        let bump = || {
            evaluated.set(evaluated.get() + 1);
            evaluated.get()
        };

        verbose_log!(in state, LOG, "{}", bump());
        dev_log!(in state, LOG, "{}", bump());
        info_log!(in state, LOG, "{}", bump());
        assert_eq!(evaluated.get(), 0);
        assert!(out.lock().is_empty());

        warning_log!(in state, LOG, "{}", bump());
        assert_eq!(evaluated.get(), 1);
        assert_eq!(out.lock().len(), 1);
    }

    #[test]
    fn test_suppressed_macro_does_not_evaluate_channel() {
        let (state, _out) = capture_state(Level::Error);
        let touched = Cell::new(false);
        let channel = || {
            touched.set(true);
            "lazy"
        };

        info_log!(in state, channel(), "hidden");
        assert!(!touched.get());
    }

    #[test]
    fn test_log_at_with_string_channel() {
        let (state, out) = capture_state(Level::Trace);
        let channel = String::from("dynamic");

        log_at!(in state, channel, Level::Dev, "x={}", 1);
        assert_eq!(out.lock()[0], (Level::Dev, String::new(), "x=1".to_string()));
    }

    #[test]
    fn test_debug_and_trace_follow_build_profile() {
        let (state, out) = capture_state(Level::Trace);

        debug_log!(in state, LOG, "d");
        trace_log!(in state, LOG, "t");

        let expected = if cfg!(debug_assertions) { 2 } else { 0 };
        assert_eq!(out.lock().len(), expected);
    }
}
