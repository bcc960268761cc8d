//! Configuration options for copy operations.
//!
//! This module provides [`CopyOptions`] for configuring copy behavior.
//!
//! # Example
//!
//! ```
//! use ocopy::CopyOptions;
//!
//! // Create options with builder pattern
//! let options = CopyOptions::default()
//!     .with_chunk_size(256 * 1024)
//!     .without_fsync();
//! ```

use std::fmt;

use tokio_util::sync::CancellationToken;

#[cfg(feature = "progress")]
use crate::progress::ProgressCallback;

/// Default size of the copy buffer in bytes (64 KiB).
///
/// Chunking is an implementation detail: the copied byte stream is identical
/// for every chunk size. The default balances per-call overhead against
/// memory held per in-flight copy.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Options for copy operations.
///
/// Use [`Default::default()`] to get sensible defaults, then customize
/// using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `chunk_size` | 64 KiB | Copy buffer size |
/// | `fsync` | `true` | Sync output files to disk on release |
/// | `cancel_token` | `None` | No external cancellation |
///
/// # Example
///
/// ```
/// use ocopy::{CancellationToken, CopyOptions};
///
/// let cancel = CancellationToken::new();
/// let options = CopyOptions::default()
///     .with_chunk_size(1024 * 1024)   // Larger chunks for fast links
///     .with_cancel_token(cancel.clone());
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyOptions {
    /// Size of the copy buffer in bytes (default: 64 KiB)
    ///
    /// Values below 1 are treated as 1. The total byte count transferred is
    /// invariant under this setting.
    pub chunk_size: usize,

    /// Whether to sync output files to disk on release (default: true)
    ///
    /// This ensures durability but may slow down copies. Has no effect on
    /// stdout or caller-supplied sinks.
    pub fsync: bool,

    /// Token for cooperative cancellation (default: none)
    ///
    /// When the token fires, the in-flight read or write is aborted and the
    /// copy returns [`Error::Cancelled`](crate::Error::Cancelled) with the
    /// byte count written so far.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub cancel_token: Option<CancellationToken>,

    /// Callback for warnings (optional)
    ///
    /// If not set and the `tracing` feature is enabled, warnings are logged
    /// via tracing. Otherwise, warnings are silently ignored.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,

    /// Callback invoked with the cumulative byte count after each chunk
    #[cfg(feature = "progress")]
    #[cfg_attr(feature = "serde", serde(skip))]
    pub progress: Option<ProgressCallback>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            fsync: true,
            cancel_token: None,
            warn_handler: None,
            #[cfg(feature = "progress")]
            progress: None,
        }
    }
}

impl fmt::Debug for CopyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("CopyOptions");
        debug
            .field("chunk_size", &self.chunk_size)
            .field("fsync", &self.fsync)
            .field("cancel_token", &self.cancel_token)
            .field("warn_handler", &self.warn_handler.is_some());
        #[cfg(feature = "progress")]
        debug.field("progress", &self.progress.is_some());
        debug.finish()
    }
}

impl CopyOptions {
    /// Set the copy buffer size
    ///
    /// Value is clamped to at least 1 to prevent a stalled copy loop.
    #[must_use]
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    /// Disable fsync for faster (but less durable) copies
    #[must_use]
    pub fn without_fsync(mut self) -> Self {
        self.fsync = false;
        self
    }

    /// Set a cancellation token for cooperative cancellation.
    ///
    /// When the token is cancelled, the copier aborts the in-flight read or
    /// write, releases both handles, and returns
    /// [`Error::Cancelled`](crate::Error::Cancelled) with partial progress.
    ///
    /// # Example
    ///
    /// ```
    /// use ocopy::{CancellationToken, CopyOptions};
    ///
    /// let cancel = CancellationToken::new();
    /// let options = CopyOptions::default().with_cancel_token(cancel.clone());
    ///
    /// // From a signal handler or another task:
    /// cancel.cancel();
    /// assert!(options.is_cancelled());
    /// ```
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = Some(token);
        self
    }

    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Set a progress callback invoked with the cumulative byte count
    /// after each chunk reaches the sink.
    #[cfg(feature = "progress")]
    #[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Whether the cancellation token has fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }
}
