//! Platform abstraction layer
//!
//! Centralizes the platform-specific pieces of the built-in sinks:
//! - console availability (is there anything attached to write to)
//! - platform debug output (OutputDebugString on Windows, syslog on Unix)

use std::fmt;

#[cfg(windows)]
mod windows;

/// Check whether a console is attached to the process
///
/// - Windows: the process owns or shares a console window
/// - Unix: stdout is a terminal, or `TERM` names something other than `dumb`
/// - Other: false
pub fn console_available() -> bool {
    #[cfg(windows)]
    {
        windows::console_available()
    }
    #[cfg(all(unix, not(windows)))]
    {
        if stdout_is_terminal() {
            return true;
        }
        std::env::var("TERM")
            .map(|term| !term.is_empty() && term != "dumb")
            .unwrap_or(false)
    }
    #[cfg(not(any(windows, unix)))]
    {
        false
    }
}

/// Check whether stdout is an interactive terminal (enables colors)
pub fn stdout_is_terminal() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}

/// Send one line to the platform debug output
///
/// - Windows: OutputDebugStringW (visible in debuggers / DebugView)
/// - Unix: syslog at LOG_DEBUG priority
/// - Other: no-op
///
/// The line is rendered straight into the buffer handed to the platform.
/// Best-effort: failures are ignored.
pub fn write_debug_output(line: impl fmt::Display) {
    #[cfg(windows)]
    {
        windows::write_debug_output(&format!("{}\r\n", line));
    }
    #[cfg(all(unix, not(windows)))]
    {
        use std::io::Write;

        let mut bytes = Vec::with_capacity(128);
        if write!(bytes, "{}", line).is_err() {
            return;
        }
        // Interior NULs cannot cross the C boundary; drop the line.
        if let Ok(text) = std::ffi::CString::new(bytes) {
            unsafe {
                libc::syslog(libc::LOG_DEBUG, c"%s".as_ptr(), text.as_ptr());
            }
        }
    }
    #[cfg(not(any(windows, unix)))]
    {
        let _ = line;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_available_does_not_panic() {
        let _ = console_available();
        let _ = stdout_is_terminal();
    }

    #[test]
    fn test_debug_output_rejects_interior_nul_quietly() {
        write_debug_output("bad\0line");
    }

    #[test]
    fn test_debug_output_accepts_formatted_lines() {
        write_debug_output(format_args!("[{}] [{}] {}", "disk", "INFO", 42));
    }
}
