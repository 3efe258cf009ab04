//! Sinks for the raw body of a response that could not be decoded.
//!
//! The client only writes here when `log_on_failure` is enabled. Every sink
//! is shared between concurrent callers, so appends go through `&self`.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Name of the log file `FileSink::temp` writes to.
pub const TEMP_LOG_NAME: &str = "tweebo_log";

/// An append-only line sink.
pub trait LogSink: Send + Sync {
    fn write_line(&self, line: &str) -> io::Result<()>;
}

/// Emits each line as a `tracing` error event. The default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        tracing::error!(raw = line, "undecodable parser response");
        Ok(())
    }
}

/// Keeps lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        lock(&self.lines).clone()
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        lock(&self.lines).push(line.to_string());
        Ok(())
    }
}

/// Appends lines to a file.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Open `path` for appending, discarding whatever an earlier run left.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// `FileSink::create` on `<temp dir>/tweebo_log`.
    pub fn temp() -> io::Result<Self> {
        Self::create(std::env::temp_dir().join(TEMP_LOG_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut file = lock(&self.file);
        writeln!(file, "{line}")?;
        file.flush()
    }
}

// Sinks stay usable after a writer panics.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
