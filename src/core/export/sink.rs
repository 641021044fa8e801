//! Output sinks for exported documents
//!
//! A [`SinkProvider`] hands out a [`ScopedSink`] per export. The scoped sink
//! is released exactly once: explicitly through [`ScopedSink::release`] on
//! success, or by `Drop` on any early return.

use crate::domain::Result;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Source of output sinks, one per export attempt
pub trait SinkProvider: Send + Sync {
    /// Writer handed out for each artifact
    type Sink: Write + Send;

    /// Acquire a sink for `file_name`, replacing any existing artifact of that name
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the sink cannot be opened.
    fn acquire(&self, file_name: &str) -> Result<ScopedSink<Self::Sink>>;
}

/// A sink that is released exactly once
///
/// Holds the artifact path the sink writes to.
pub struct ScopedSink<S: Write> {
    inner: Option<S>,
    artifact: PathBuf,
}

impl<S: Write> ScopedSink<S> {
    /// Wrap an open sink writing to `artifact`
    pub fn new(sink: S, artifact: impl Into<PathBuf>) -> Self {
        Self {
            inner: Some(sink),
            artifact: artifact.into(),
        }
    }

    /// Where the sink's content ends up
    pub fn artifact(&self) -> &Path {
        &self.artifact
    }

    /// Flush and release the sink
    pub fn release(mut self) -> io::Result<()> {
        match self.inner.take() {
            Some(mut sink) => {
                let flushed = sink.flush();
                drop(sink);
                tracing::trace!(artifact = %self.artifact.display(), "Released sink");
                flushed
            }
            None => Ok(()),
        }
    }

    fn sink(&mut self) -> io::Result<&mut S> {
        self.inner
            .as_mut()
            .ok_or_else(|| io::Error::new(ErrorKind::BrokenPipe, "sink already released"))
    }
}

impl<S: Write> Write for ScopedSink<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink()?.flush()
    }
}

impl<S: Write> Drop for ScopedSink<S> {
    fn drop(&mut self) {
        if let Some(sink) = self.inner.take() {
            tracing::debug!(
                artifact = %self.artifact.display(),
                "Releasing abandoned sink"
            );
            drop(sink);
        }
    }
}

/// Writes artifacts as files in one directory
#[derive(Debug, Clone)]
pub struct FileSinkProvider {
    directory: PathBuf,
}

impl FileSinkProvider {
    /// Provider writing into `directory` (created on first use)
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Provider writing into the system temporary directory
    pub fn temp_dir() -> Self {
        Self::new(std::env::temp_dir())
    }

    /// Output directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl Default for FileSinkProvider {
    fn default() -> Self {
        Self::temp_dir()
    }
}

impl SinkProvider for FileSinkProvider {
    type Sink = BufWriter<File>;

    fn acquire(&self, file_name: &str) -> Result<ScopedSink<Self::Sink>> {
        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(file_name);

        match fs::remove_file(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "Removed existing artifact"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let file = File::create(&path)?;
        Ok(ScopedSink::new(BufWriter::new(file), path))
    }
}

/// Content and bookkeeping for one named buffer
#[derive(Debug, Clone, Default)]
struct Shelved {
    bytes: Vec<u8>,
    acquired: usize,
    released: usize,
}

type Shelf = Arc<Mutex<HashMap<String, Shelved>>>;

/// Keeps artifacts in memory
///
/// Every released or dropped buffer is shelved under its name, partial
/// content included.
#[derive(Debug, Clone, Default)]
pub struct BufferSinkProvider {
    shelf: Shelf,
}

impl BufferSinkProvider {
    /// Empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes shelved under `name`
    pub fn bytes(&self, name: &str) -> Option<Vec<u8>> {
        self.with_entry(name, |entry| entry.bytes.clone())
    }

    /// Shelved content as text
    pub fn contents(&self, name: &str) -> Option<String> {
        self.bytes(name)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// How many times a sink was acquired for `name`
    pub fn acquisitions(&self, name: &str) -> usize {
        self.with_entry(name, |entry| entry.acquired).unwrap_or(0)
    }

    /// How many times a sink for `name` was released
    pub fn releases(&self, name: &str) -> usize {
        self.with_entry(name, |entry| entry.released).unwrap_or(0)
    }

    /// Names of every acquired buffer, sorted
    pub fn names(&self) -> Vec<String> {
        let shelf = self.shelf.lock().unwrap_or_else(|p| p.into_inner());
        let mut names: Vec<String> = shelf.keys().cloned().collect();
        names.sort();
        names
    }

    fn with_entry<T>(&self, name: &str, read: impl FnOnce(&Shelved) -> T) -> Option<T> {
        let shelf = self.shelf.lock().unwrap_or_else(|p| p.into_inner());
        shelf.get(name).map(read)
    }
}

impl SinkProvider for BufferSinkProvider {
    type Sink = BufferSink;

    fn acquire(&self, file_name: &str) -> Result<ScopedSink<Self::Sink>> {
        {
            let mut shelf = self.shelf.lock().unwrap_or_else(|p| p.into_inner());
            let entry = shelf.entry(file_name.to_string()).or_default();
            entry.acquired += 1;
            entry.bytes.clear();
        }

        let sink = BufferSink {
            name: file_name.to_string(),
            bytes: Vec::new(),
            shelf: Arc::clone(&self.shelf),
        };
        Ok(ScopedSink::new(sink, file_name))
    }
}

/// In-memory sink that shelves its content when dropped
#[derive(Debug)]
pub struct BufferSink {
    name: String,
    bytes: Vec<u8>,
    shelf: Shelf,
}

impl Write for BufferSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for BufferSink {
    fn drop(&mut self) {
        let mut shelf = self.shelf.lock().unwrap_or_else(|p| p.into_inner());
        let entry = shelf.entry(std::mem::take(&mut self.name)).or_default();
        entry.bytes = std::mem::take(&mut self.bytes);
        entry.released += 1;
    }
}
