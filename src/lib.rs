//! # ocopy
//!
//! Streaming object copy between object stores and local sinks.
//!
//! ## Core Pieces
//!
//! - **Copy engine**: [`copy_stream`] moves bytes from a source handle to a
//!   sink handle in bounded chunks, with partial-progress error reporting
//!   and guaranteed release of both handles on every exit path
//! - **Backends**: the [`ObjectStore`] capability with two variants,
//!   [`S3Store`] (aws-sdk-s3) and [`FsStore`] (a local directory standing
//!   in as a bucket)
//! - **Sinks**: standard output or create-or-truncate files, via
//!   [`OutputTarget`] and [`SinkHandle`]
//! - **Cancellation**: a [`CancellationToken`] in [`CopyOptions`] aborts an
//!   in-flight read or write and reports how far the copy got
//!
//! ## Quick Start
//!
//! ```no_run
//! use ocopy::{CopyOptions, FsStore, OutputTarget, copy_object};
//!
//! # async fn demo() -> Result<(), ocopy::Error> {
//! let store = FsStore::new("/var/data");
//! let target = OutputTarget::parse("report.csv");
//!
//! let stats = copy_object(&store, "reports/2024.csv", &target, &CopyOptions::default()).await?;
//! println!("copied {} bytes", stats.bytes_copied);
//! # Ok(())
//! # }
//! ```
//!
//! ### Reading from S3
//!
//! ```no_run
//! use ocopy::{CopyOptions, ObjectStore, OutputTarget, S3Config, S3Store, SinkHandle};
//!
//! # async fn demo() -> Result<(), ocopy::Error> {
//! let store = S3Store::connect(
//!     "my-bucket",
//!     S3Config {
//!         region: Some("us-west-2".to_owned()),
//!         ..S3Config::default()
//!     },
//! )
//! .await;
//!
//! // Open the source first; the sink is only created once the lookup
//! // succeeds, so a missing key never leaves an empty file behind.
//! let source = store.open("/path/to/file.txt").await?;
//! let sink = SinkHandle::open(&OutputTarget::Stdout).await?;
//! let stats = ocopy::copy_stream(source, sink, &CopyOptions::default()).await?;
//! eprintln!("copied {} bytes", stats.bytes_copied);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every failure carries the bytes already written ([`Error::bytes_copied`])
//! and classifies itself via [`Error::code`], so callers can decide between
//! fatal and soft handling without matching the full enum. The copier never
//! retries; backend-level retries belong to the SDK.
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `progress` | Byte-oriented progress bars with indicatif |
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`CopyOptions`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod copy;
mod error;
mod handle;
mod options;
mod store;

#[cfg(feature = "progress")]
mod progress;

pub use copy::{CopyStats, copy_object, copy_stream};
pub use error::{Error, ErrorCode, Result};
pub use handle::{OutputTarget, SinkHandle, SourceHandle};
pub use options::{CopyOptions, DEFAULT_CHUNK_SIZE};
pub use store::{FsStore, ObjectStore, S3Config, S3Store};

// Re-exported so callers can wire cancellation without naming tokio-util.
pub use tokio_util::sync::CancellationToken;

#[cfg(feature = "progress")]
#[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
pub use progress::{ProgressCallback, create_progress_bar};
