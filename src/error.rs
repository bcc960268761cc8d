//! Error types for ocopy.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur while acquiring handles or streaming bytes, and the
//! [`Result`] type alias.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Acquisition | [`Error::Open`], [`Error::Create`] |
//! | Transfer | [`Error::Read`], [`Error::Write`] |
//! | Release | [`Error::Close`] |
//! | Control | [`Error::Cancelled`] |
//!
//! Transfer and control errors carry the number of bytes already written to
//! the sink, so callers always know how far a failed copy got.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for ocopy operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while opening handles or copying a stream.
///
/// Use the [`std::error::Error`] trait methods to access underlying causes
/// where applicable, and [`Error::code`] to classify an error without
/// matching on every variant.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Source handle could not be acquired
    ///
    /// The underlying cause keeps the backend's io error kind: a missing
    /// object maps to [`io::ErrorKind::NotFound`], a rejected credential to
    /// [`io::ErrorKind::PermissionDenied`].
    #[error("failed to open source object {key:?}: {source}")]
    Open {
        /// The object key that could not be opened
        key: String,
        /// Underlying error
        source: io::Error,
    },

    /// Sink handle could not be acquired
    #[error("failed to create output file {path}: {source}")]
    Create {
        /// The output path that could not be created
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Reading from the source failed mid-transfer
    ///
    /// The sink contains exactly `bytes_copied` bytes: every chunk read
    /// before the failure was written in full.
    #[error("read failed after {bytes_copied} bytes: {source}")]
    Read {
        /// Bytes written to the sink before the failure
        bytes_copied: u64,
        /// Underlying error
        source: io::Error,
    },

    /// Writing to the sink failed mid-transfer
    ///
    /// `bytes_copied` counts only fully-acknowledged chunks; the chunk that
    /// failed is not included even if parts of it reached the sink.
    #[error("write failed after {bytes_copied} bytes: {source}")]
    Write {
        /// Bytes acknowledged by the sink before the failure
        bytes_copied: u64,
        /// Underlying error
        source: io::Error,
    },

    /// Releasing a handle failed
    ///
    /// Surfaced only from an explicit [`SinkHandle::close`]. Inside the
    /// copier a close failure is reported as a warning and never replaces
    /// the transfer outcome.
    ///
    /// [`SinkHandle::close`]: crate::SinkHandle::close
    #[error("failed to release sink: {source}")]
    Close {
        /// Underlying error
        source: io::Error,
    },

    /// Operation was cancelled via cancellation token
    ///
    /// The handles were still released and the sink flushed, so the
    /// `bytes_copied` bytes written before cancellation remain intact.
    #[error("copy cancelled after {bytes_copied} bytes")]
    Cancelled {
        /// Bytes written to the sink before cancellation
        bytes_copied: u64,
    },
}

impl Error {
    /// Classify this error without matching on every variant.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Open { .. } => ErrorCode::OpenFailed,
            Self::Create { .. } => ErrorCode::CreateFailed,
            Self::Read { .. } => ErrorCode::ReadFailed,
            Self::Write { .. } => ErrorCode::WriteFailed,
            Self::Close { .. } => ErrorCode::CloseFailed,
            Self::Cancelled { .. } => ErrorCode::Cancelled,
        }
    }

    /// Bytes that reached the sink before this error occurred.
    ///
    /// Zero for acquisition and release errors, which happen outside the
    /// transfer loop.
    #[must_use]
    pub fn bytes_copied(&self) -> u64 {
        match self {
            Self::Read { bytes_copied, .. }
            | Self::Write { bytes_copied, .. }
            | Self::Cancelled { bytes_copied } => *bytes_copied,
            Self::Open { .. } | Self::Create { .. } | Self::Close { .. } => 0,
        }
    }
}

/// Stable machine-readable classification of an [`Error`].
///
/// Callers deciding between fatal and soft failure handling (or mapping to
/// process exit codes) match on this instead of the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Source handle acquisition failed
    OpenFailed,
    /// Sink handle acquisition failed
    CreateFailed,
    /// Read side of the transfer failed
    ReadFailed,
    /// Write side of the transfer failed
    WriteFailed,
    /// Handle release failed
    CloseFailed,
    /// The cancellation token fired
    Cancelled,
}

impl ErrorCode {
    /// Stable snake_case name, suitable for log fields and JSON output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenFailed => "open_failed",
            Self::CreateFailed => "create_failed",
            Self::ReadFailed => "read_failed",
            Self::WriteFailed => "write_failed",
            Self::CloseFailed => "close_failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
