//! S3-backed object store.
//!
//! Thin adapter over `aws-sdk-s3`: credential resolution, retries, and the
//! wire protocol stay in the SDK; this module turns a `GetObject` response
//! body into a [`SourceHandle`] and folds SDK failures into the crate's
//! error taxonomy.

use std::io;

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;

use crate::error::{Error, Result};
use crate::handle::SourceHandle;
use crate::store::ObjectStore;

/// Region used when neither the caller nor the environment names one.
const DEFAULT_REGION: &str = "us-west-2";

/// Connection settings for [`S3Store::connect`].
///
/// Everything is optional; the default resolves the region from the
/// environment and talks to AWS proper with virtual-hosted addressing.
#[derive(Debug, Clone, Default)]
pub struct S3Config {
    /// Region identifier; falls back to the environment, then `us-west-2`
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible services (MinIO, localstack)
    pub endpoint: Option<String>,
    /// Use path-style addressing instead of virtual-hosted buckets
    pub path_style: bool,
}

/// Object store over one S3 bucket.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Wrap an already-configured SDK client.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from the ambient AWS environment plus `config`.
    ///
    /// Credentials come from the SDK's default provider chain (environment,
    /// profiles, IMDS); failures there surface as
    /// [`Error::Open`](crate::Error::Open) on the first read.
    pub async fn connect(bucket: impl Into<String>, config: S3Config) -> Self {
        let region = RegionProviderChain::first_try(config.region.map(Region::new))
            .or_default_provider()
            .or_else(Region::new(DEFAULT_REGION));
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
        if let Some(endpoint) = config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.path_style)
            .build();
        Self::new(Client::from_conf(s3_config), bucket)
    }

    /// The bucket this store reads from.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn open(&self, key: &str) -> Result<SourceHandle> {
        let resp = self
            .client
            .get_object()
            .bucket(self.bucket.as_str())
            .key(key)
            .send()
            .await
            .map_err(|err| Error::Open {
                key: key.to_owned(),
                source: get_object_io_error(err),
            })?;
        let content_length = resp.content_length().and_then(|len| u64::try_from(len).ok());
        Ok(SourceHandle::new(
            resp.body.into_async_read(),
            content_length,
        ))
    }
}

/// Fold SDK failures into io error kinds so every backend reports through
/// one taxonomy: missing key is `NotFound`, denied access is
/// `PermissionDenied`, everything else keeps the SDK error as its cause.
fn get_object_io_error(err: SdkError<GetObjectError>) -> io::Error {
    let kind = match err.as_service_error() {
        Some(service) if service.is_no_such_key() => io::ErrorKind::NotFound,
        Some(service) if service.code() == Some("AccessDenied") => io::ErrorKind::PermissionDenied,
        _ => io::ErrorKind::Other,
    };
    io::Error::new(kind, err)
}
