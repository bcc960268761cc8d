//! Storage backends.
//!
//! [`ObjectStore`] is the capability the copier consumes: resolve a key to
//! an open, readable [`SourceHandle`]. Two implementations ship with the
//! crate: [`S3Store`] for S3-compatible object storage and [`FsStore`] for
//! a local directory standing in as a bucket.

mod fs;
mod s3;

pub use fs::FsStore;
pub use s3::{S3Config, S3Store};

use async_trait::async_trait;

use crate::error::Result;
use crate::handle::SourceHandle;

/// Open-by-key access to a flat namespace of byte objects.
///
/// Listing, directory emulation, retries, and multipart transfer are the
/// backend SDK's business; this capability is exactly what a streaming copy
/// needs and nothing more.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Open the object at `key` for sequential reading.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Open`](crate::Error::Open) when the object cannot
    /// be opened; the underlying io error kind distinguishes missing
    /// objects, denied access, and transport failures.
    async fn open(&self, key: &str) -> Result<SourceHandle>;
}
