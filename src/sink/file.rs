//! File sink
//!
//! Appends plain-text lines to a single log file. The sink owns the open
//! handle: switching to another path flushes and closes the previous file
//! first, disabling closes it. Each line is assembled in the buffer and
//! flushed before `write` returns, so it reaches the file in one write.

use super::LogSink;
use crate::error::{LogError, Result};
use crate::message::LogMessage;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct FileSink {
    timestamps: bool,
    path: Option<PathBuf>,
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    /// Closed file sink
    pub const fn new() -> Self {
        Self {
            timestamps: true,
            path: None,
            writer: None,
        }
    }

    /// Enable, retarget or disable the sink
    ///
    /// Re-enabling with the path that is already open keeps the handle. On
    /// error the sink is left closed.
    pub fn configure(
        &mut self,
        enabled: bool,
        path: Option<&Path>,
        timestamps: bool,
    ) -> Result<()> {
        self.timestamps = timestamps;

        if !enabled {
            self.close();
            return Ok(());
        }

        let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
            self.close();
            return Err(LogError::FileMissingPath);
        };

        if self.writer.is_some() && self.path.as_deref() == Some(path) {
            return Ok(());
        }

        self.close();
        let file = open_append(path).map_err(|source| LogError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "log file opened");

        self.writer = Some(BufWriter::new(file));
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    /// Path of the currently open file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn timestamps(&self) -> bool {
        self.timestamps
    }

    fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
            if let Some(path) = &self.path {
                debug!(path = %path.display(), "log file closed");
            }
        }
        self.path = None;
    }
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        self.close();
    }
}

impl LogSink for FileSink {
    fn write(&mut self, message: &LogMessage<'_>) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };

        // Disk full and friends: skip this line, keep the sink.
        if write_line(writer, message, self.timestamps).is_ok() {
            let _ = writer.flush();
        }
    }

    fn flush(&mut self) {
        if let Some(writer) = self.writer.as_mut() {
            let _ = writer.flush();
        }
    }
}

fn write_line(
    writer: &mut BufWriter<File>,
    message: &LogMessage<'_>,
    timestamps: bool,
) -> io::Result<()> {
    // One formatted write per line keeps lines whole in the buffer.
    let line = format!("{}\n", message.line(timestamps));
    writer.write_all(line.as_bytes())
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    fn unique_temp_dir(tag: &str) -> PathBuf {
        let base = std::env::temp_dir();
        let pid = std::process::id();
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        base.join(format!("chanlog-file-{}-{}-{}", tag, pid, ts))
    }

    fn message(level: Level, text: &'static str) -> LogMessage<'static> {
        LogMessage {
            channel: "disk",
            function: None,
            level,
            text,
            timestamp: 0.5,
        }
    }

    #[test]
    fn test_enable_without_path_stays_disabled() {
        let mut sink = FileSink::new();
        let err = sink.configure(true, None, true).unwrap_err();

        assert!(matches!(err, LogError::FileMissingPath));
        assert!(!sink.is_enabled());
    }

    #[test]
    fn test_open_failure_leaves_sink_disabled() {
        let dir = unique_temp_dir("blocked");
        fs::create_dir_all(&dir).unwrap();
        // A directory cannot be opened as a log file.
        let err = sink_configure_expect_err(&dir);

        assert!(matches!(err, LogError::FileOpen { .. }));
        let _ = fs::remove_dir_all(&dir);
    }

    fn sink_configure_expect_err(path: &Path) -> LogError {
        let mut sink = FileSink::new();
        let err = sink.configure(true, Some(path), true).unwrap_err();
        assert!(!sink.is_enabled());
        assert!(sink.path().is_none());
        err
    }

    #[test]
    fn test_writes_plain_lines_and_creates_parent() {
        let dir = unique_temp_dir("lines");
        let path = dir.join("nested").join("app.log");

        let mut sink = FileSink::new();
        sink.configure(true, Some(&path), false).unwrap();
        sink.write(&message(Level::Info, "one"));
        sink.write(&message(Level::Error, "two"));
        sink.configure(false, None, false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[disk] [INFO] one\n[disk] [ERROR] two\n");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_timestamps_prefix_lines() {
        let dir = unique_temp_dir("ts");
        let path = dir.join("app.log");

        let mut sink = FileSink::new();
        sink.configure(true, Some(&path), true).unwrap();
        sink.write(&message(Level::Info, "hello"));
        sink.flush();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[    0.5000] [disk] [INFO] hello\n");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_same_path_keeps_handle_and_appends() {
        let dir = unique_temp_dir("same");
        let path = dir.join("app.log");

        let mut sink = FileSink::new();
        sink.configure(true, Some(&path), false).unwrap();
        sink.write(&message(Level::Info, "a"));
        sink.configure(true, Some(&path), true).unwrap();
        assert!(sink.timestamps());
        sink.configure(false, None, false).unwrap();

        // Reopening appends rather than truncating.
        sink.configure(true, Some(&path), false).unwrap();
        sink.write(&message(Level::Info, "b"));
        drop(sink);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_every_level_reaches_disk_without_flush() {
        let dir = unique_temp_dir("flush");
        let path = dir.join("app.log");

        let mut sink = FileSink::new();
        sink.configure(true, Some(&path), false).unwrap();
        sink.write(&message(Level::Warning, "careful"));
        sink.write(&message(Level::Trace, "tick"));

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[disk] [WARNING] careful\n[disk] [TRACE] tick\n");
        drop(sink);
        let _ = fs::remove_dir_all(&dir);
    }
}
