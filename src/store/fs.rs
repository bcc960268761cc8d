//! Local-filesystem object store.
//!
//! Maps a flat key namespace onto files under a root directory, so the
//! copier (and the CLI's integration tests) can run against a plain
//! directory instead of a remote bucket.

use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::File;

use crate::error::{Error, Result};
use crate::handle::SourceHandle;
use crate::store::ObjectStore;

/// Object store over a local directory.
///
/// Keys are bucket-relative: a leading `/` is stripped, and keys escaping
/// the root with `..` components are rejected.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Serve objects from the directory at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory keys are resolved under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> io::Result<PathBuf> {
        let relative = key.trim_start_matches('/');
        let path = Path::new(relative);
        let escapes = path.components().any(|component| {
            matches!(
                component,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if relative.is_empty() || escapes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid object key: {key:?}"),
            ));
        }
        Ok(self.root.join(path))
    }
}

#[async_trait]
impl ObjectStore for FsStore {
    async fn open(&self, key: &str) -> Result<SourceHandle> {
        let open_err = |source| Error::Open {
            key: key.to_owned(),
            source,
        };
        let path = self.resolve(key).map_err(open_err)?;
        let file = File::open(&path).await.map_err(open_err)?;
        let content_length = file.metadata().await.ok().map(|meta| meta.len());
        Ok(SourceHandle::new(file, content_length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_object(key_path: &str, contents: &[u8]) -> (TempDir, FsStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(key_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        let store = FsStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_open_reports_content_length() {
        let (_dir, store) = store_with_object("data.txt", b"hello");
        let source = store.open("data.txt").await.unwrap();
        assert_eq!(source.content_length(), Some(5));
    }

    #[tokio::test]
    async fn test_leading_slash_is_bucket_relative() {
        let (_dir, store) = store_with_object("path/to/file.txt", b"x");
        assert!(store.open("/path/to/file.txt").await.is_ok());
        assert!(store.open("path/to/file.txt").await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_key_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = FsStore::new(dir.path());

        let err = store.open("missing.txt").await.unwrap_err();
        match err {
            Error::Open { key, source } => {
                assert_eq!(key, "missing.txt");
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected Open error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_escaping_key_rejected() {
        let dir = TempDir::new().unwrap();
        let store = FsStore::new(dir.path());

        for key in ["../secret", "a/../../secret", ""] {
            let err = store.open(key).await.unwrap_err();
            match err {
                Error::Open { source, .. } => {
                    assert_eq!(source.kind(), io::ErrorKind::InvalidInput, "key {:?}", key);
                }
                other => panic!("expected Open error, got {:?}", other),
            }
        }
    }
}
