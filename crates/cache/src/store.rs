//! Blob store seam and the filesystem implementation
//!
//! The store never interprets archive contents; it maps (scope, key) to an
//! address and moves bytes. Implementations must be thread-safe
//! (`Send + Sync`) so a host can share one store across tasks.

use crate::config::CacheScope;
use crate::{Error, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

/// Key-addressed blob storage for cache archives
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Compute the storage directory for a key. Pure addressing; never
    /// creates anything.
    fn locate(&self, key: &str) -> PathBuf;

    /// Whether a usable blob exists at `address`. Zero-length and missing
    /// blobs are identically a miss, which defends against truncated earlier
    /// writes.
    async fn exists(&self, address: &Path) -> bool;

    /// Transfer the blob at `address` into `dest`, returning the byte count
    async fn read(&self, address: &Path, dest: &Path) -> Result<u64>;

    /// Transfer the file at `src` to `address`, creating any missing parent
    /// directories, returning the byte count
    async fn write(&self, address: &Path, src: &Path) -> Result<u64>;

    /// Store name for logging
    fn name(&self) -> &'static str;
}

/// Store keeping blobs under `<root>/<repository>/<ref>/<key>/` on the local
/// filesystem
#[derive(Debug, Clone)]
pub struct FilesystemStore {
    root: PathBuf,
    scope: CacheScope,
}

impl FilesystemStore {
    /// Create a store rooted at `root`, namespaced by `scope`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, scope: CacheScope) -> Self {
        Self {
            root: root.into(),
            scope,
        }
    }

    /// The store root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl BlobStore for FilesystemStore {
    fn locate(&self, key: &str) -> PathBuf {
        self.root
            .join(&self.scope.repository)
            .join(&self.scope.ref_name)
            .join(key)
    }

    async fn exists(&self, address: &Path) -> bool {
        fs::metadata(address)
            .map(|m| m.is_file() && m.len() > 0)
            .unwrap_or(false)
    }

    async fn read(&self, address: &Path, dest: &Path) -> Result<u64> {
        let bytes = fs::copy(address, dest).map_err(|e| Error::io(e, address, "read"))?;
        tracing::debug!(address = %address.display(), bytes, "cache blob read");
        Ok(bytes)
    }

    async fn write(&self, address: &Path, src: &Path) -> Result<u64> {
        if let Some(parent) = address.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(e, parent, "create directory"))?;
        }
        let bytes = fs::copy(src, address).map_err(|e| Error::io(e, address, "write"))?;
        tracing::debug!(address = %address.display(), bytes, "cache blob stored");
        Ok(bytes)
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}
