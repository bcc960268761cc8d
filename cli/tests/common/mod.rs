//! Common test utilities for integration tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A test fixture providing a bucket root directory and an output directory.
pub struct TestFixture {
    pub bucket: TempDir,
    pub out: TempDir,
}

impl TestFixture {
    /// Create a new test fixture with fresh bucket and output directories.
    pub fn new() -> Self {
        Self {
            bucket: TempDir::new().expect("Failed to create temp bucket dir"),
            out: TempDir::new().expect("Failed to create temp output dir"),
        }
    }

    /// Store an object under the bucket root, creating parent directories
    /// for nested keys.
    pub fn put_object(&self, key: &str, contents: &[u8]) {
        let path = self.bucket.path().join(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create key parents");
        }
        fs::write(path, contents).expect("Failed to write object");
    }

    /// Path for an output file inside the output directory.
    pub fn out_path(&self, name: &str) -> PathBuf {
        self.out.path().join(name)
    }

    /// Bucket root as a string argument for `--bucket`.
    pub fn bucket_arg(&self) -> String {
        self.bucket.path().to_string_lossy().into_owned()
    }
}
