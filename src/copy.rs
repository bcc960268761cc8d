//! The streaming copy core.
//!
//! [`copy_stream`] moves every byte from a [`SourceHandle`] to a
//! [`SinkHandle`] in bounded chunks and releases both handles exactly once,
//! whatever the outcome. [`copy_object`] layers handle acquisition on top:
//! open the source from a store, resolve the sink, copy.

use std::future::Future;

use crate::error::{Error, Result};
use crate::handle::{OutputTarget, SinkHandle, SourceHandle};
use crate::options::CopyOptions;
use crate::store::ObjectStore;

/// Statistics from a completed copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Total bytes written to the sink
    pub bytes_copied: u64,
}

/// Copy everything from `source` to `sink` in bounded chunks.
///
/// Reads chunks of [`CopyOptions::chunk_size`] bytes and writes each one
/// fully before reading the next, until the source reports end-of-stream.
/// No retries: the first failure aborts the transfer.
///
/// Both handles are released exactly once on every exit path, sink first
/// (it was acquired last). A failed sink release is reported through
/// [`CopyOptions::warn_handler`] (or `tracing` when that feature is
/// enabled) and never replaces the transfer outcome.
///
/// # Errors
///
/// - [`Error::Read`] / [`Error::Write`] on a mid-transfer failure, carrying
///   the bytes already written; the sink holds exactly those bytes.
/// - [`Error::Cancelled`] when the options' cancellation token fires; the
///   in-flight read or write is abandoned, partial output stays intact.
pub async fn copy_stream(
    mut source: SourceHandle,
    mut sink: SinkHandle,
    options: &CopyOptions,
) -> Result<CopyStats> {
    let outcome = run_copy(&mut source, &mut sink, options).await;

    // Release order: sink first, then source. A close failure must not
    // mask the transfer outcome.
    if let Err(close_err) = sink.close(options.fsync).await {
        options.warn(&format!("{close_err}"));
    }
    drop(source);

    outcome.map(|bytes_copied| CopyStats { bytes_copied })
}

/// Open `key` from `store`, resolve `target`, and stream the object.
///
/// The sink is only created after the source open succeeds, so a failed
/// lookup never leaves an empty output file behind.
///
/// # Errors
///
/// [`Error::Open`] or [`Error::Create`] when a handle cannot be acquired,
/// otherwise whatever [`copy_stream`] returns.
pub async fn copy_object(
    store: &dyn ObjectStore,
    key: &str,
    target: &OutputTarget,
    options: &CopyOptions,
) -> Result<CopyStats> {
    let source = store.open(key).await?;
    let sink = SinkHandle::open(target).await?;
    copy_stream(source, sink, options).await
}

async fn run_copy(
    source: &mut SourceHandle,
    sink: &mut SinkHandle,
    options: &CopyOptions,
) -> Result<u64> {
    let mut buf = vec![0u8; options.chunk_size.max(1)];
    let mut bytes_copied: u64 = 0;

    loop {
        let n = match with_cancel(options, source.read(&mut buf)).await {
            None => return Err(Error::Cancelled { bytes_copied }),
            Some(Err(source)) => return Err(Error::Read {
                bytes_copied,
                source,
            }),
            Some(Ok(n)) => n,
        };
        if n == 0 {
            return Ok(bytes_copied);
        }

        match with_cancel(options, sink.write_all(&buf[..n])).await {
            None => return Err(Error::Cancelled { bytes_copied }),
            Some(Err(source)) => return Err(Error::Write {
                bytes_copied,
                source,
            }),
            Some(Ok(())) => {}
        }
        bytes_copied += n as u64;

        #[cfg(feature = "progress")]
        if let Some(progress) = &options.progress {
            progress(bytes_copied);
        }
    }
}

/// Run `fut` unless the options' cancellation token fires first.
///
/// `None` means cancelled. A pre-cancelled token wins before the future is
/// polled at all.
async fn with_cancel<F, T>(options: &CopyOptions, fut: F) -> Option<T>
where
    F: Future<Output = T>,
{
    match &options.cancel_token {
        Some(token) => tokio::select! {
            biased;
            () = token.cancelled() => None,
            out = fut => Some(out),
        },
        None => Some(fut.await),
    }
}
