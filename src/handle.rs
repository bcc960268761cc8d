//! Source and sink handles for streaming copies.
//!
//! A [`SourceHandle`] is an open, readable byte stream produced by an
//! [`ObjectStore`](crate::ObjectStore); a [`SinkHandle`] is the writable
//! destination. Both are owned exclusively by one copy invocation and
//! released exactly once, whatever the outcome.
//!
//! Handles deliberately hide the underlying reader/writer types so the
//! copier stays backend-agnostic, and so tests can substitute instrumented
//! mocks via [`SourceHandle::new`] and [`SinkHandle::from_writer`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tokio::fs::File;
use tokio::io::{self, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, Stdout};

use crate::error::{Error, Result};

/// Where the copied bytes go.
///
/// Parsed from a CLI-style output spec: `-` means standard output, anything
/// else is a file path that will be created or truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to standard output; flushed on release, never closed
    Stdout,
    /// Create or truncate a file at this path
    File(PathBuf),
}

impl OutputTarget {
    /// Parse an output spec: `-` is stdout, anything else a file path.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        if spec == "-" {
            Self::Stdout
        } else {
            Self::File(PathBuf::from(spec))
        }
    }
}

/// An open, readable byte stream plus an optional size hint.
///
/// The size hint comes from the backend (S3 `Content-Length`, filesystem
/// metadata) and is for display only; the copy always runs to end-of-stream.
///
/// Releasing a source is dropping it; the copier guarantees the drop happens
/// on every exit path.
pub struct SourceHandle {
    reader: Pin<Box<dyn AsyncRead + Send>>,
    content_length: Option<u64>,
}

impl SourceHandle {
    /// Wrap a reader. Backends call this; tests can inject mocks.
    pub fn new(reader: impl AsyncRead + Send + 'static, content_length: Option<u64>) -> Self {
        Self {
            reader: Box::pin(reader),
            content_length,
        }
    }

    /// Total size reported by the backend, if it knows one.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    pub(crate) async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf).await
    }
}

impl fmt::Debug for SourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceHandle")
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

enum SinkWriter {
    Stdout(Stdout),
    File(File),
    Custom(Pin<Box<dyn AsyncWrite + Send>>),
}

/// An open, writable byte stream.
///
/// Created from an [`OutputTarget`] (or any writer, for tests). Must be
/// released with [`SinkHandle::close`], which flushes buffered bytes and,
/// for file sinks, optionally syncs to disk. The copier performs the close
/// itself on every exit path.
pub struct SinkHandle {
    writer: SinkWriter,
    path: Option<PathBuf>,
}

impl SinkHandle {
    /// The process standard output. Flushed on release, never closed.
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            writer: SinkWriter::Stdout(io::stdout()),
            path: None,
        }
    }

    /// Create or truncate a file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Create`] on permission or path errors.
    pub async fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).await.map_err(|source| Error::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            writer: SinkWriter::File(file),
            path: Some(path.to_path_buf()),
        })
    }

    /// Resolve an [`OutputTarget`] into an open sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Create`] when a file target cannot be created.
    pub async fn open(target: &OutputTarget) -> Result<Self> {
        match target {
            OutputTarget::Stdout => Ok(Self::stdout()),
            OutputTarget::File(path) => Self::create(path).await,
        }
    }

    /// Wrap an arbitrary writer (in-memory buffers, test doubles).
    ///
    /// Released via the writer's `shutdown`; the `fsync` option does not
    /// apply.
    pub fn from_writer(writer: impl AsyncWrite + Send + 'static) -> Self {
        Self {
            writer: SinkWriter::Custom(Box::pin(writer)),
            path: None,
        }
    }

    pub(crate) async fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match &mut self.writer {
            SinkWriter::Stdout(writer) => writer.write_all(buf).await,
            SinkWriter::File(file) => file.write_all(buf).await,
            SinkWriter::Custom(writer) => writer.write_all(buf).await,
        }
    }

    /// Release the sink.
    ///
    /// Flushes buffered bytes; file sinks are additionally synced to disk
    /// when `fsync` is set. Stdout is flushed and left open.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Close`] if the flush, sync, or shutdown fails. The
    /// bytes written before the close are not affected.
    pub async fn close(mut self, fsync: bool) -> Result<()> {
        let result = match &mut self.writer {
            SinkWriter::Stdout(writer) => writer.flush().await,
            SinkWriter::File(file) => match file.flush().await {
                Ok(()) if fsync => file.sync_all().await,
                other => other,
            },
            SinkWriter::Custom(writer) => match writer.flush().await {
                Ok(()) => writer.shutdown().await,
                Err(e) => Err(e),
            },
        };
        result.map_err(|source| Error::Close { source })
    }
}

impl fmt::Debug for SinkHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.writer {
            SinkWriter::Stdout(_) => "stdout",
            SinkWriter::File(_) => "file",
            SinkWriter::Custom(_) => "custom",
        };
        f.debug_struct("SinkHandle")
            .field("kind", &kind)
            .field("path", &self.path)
            .finish()
    }
}
