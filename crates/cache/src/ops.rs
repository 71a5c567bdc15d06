//! Restore and save orchestration
//!
//! Sequences validation, key scanning, archive transfer and extraction or
//! packaging, and guaranteed cleanup of staging artifacts. Outcomes are
//! explicit: a hit, a clean miss, or a degraded failure. Only caller errors
//! (validation, capacity, empty path set) propagate as `Err`; environmental
//! failures are logged and absorbed, because a cache is an optimization and
//! must never block the task it accelerates.

use crate::config::CacheConfig;
use crate::store::{BlobStore, FilesystemStore};
use crate::{Error, Result, archive, key, paths};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Options for a restore operation
#[derive(Debug, Clone, Copy, Default)]
pub struct RestoreOptions {
    /// Report a hit without transferring or extracting content
    pub lookup_only: bool,
}

/// Outcome of a restore operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RestoreOutcome {
    /// An entry matched one of the lookup keys
    Hit {
        /// The key that actually matched
        key: String,
        /// Bytes transferred; `None` for a lookup-only probe
        bytes: Option<u64>,
    },
    /// No entry matched any key, or no cache is configured
    Miss,
    /// An entry matched but could not be restored; the caller proceeds as on
    /// a miss
    Degraded {
        /// Human-readable failure description
        detail: String,
    },
}

impl RestoreOutcome {
    /// The matched key, if any
    #[must_use]
    pub fn matched_key(&self) -> Option<&str> {
        match self {
            Self::Hit { key, .. } => Some(key),
            Self::Miss | Self::Degraded { .. } => None,
        }
    }

    /// Whether the restore found and used an entry
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// Outcome of a save operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveOutcome {
    /// The archive was stored under the target key
    Saved {
        /// The key written to
        key: String,
        /// Archive size in bytes
        bytes: u64,
    },
    /// No cache is configured; nothing was stored
    Skipped,
    /// Packaging or storage failed; nothing usable was stored
    Degraded {
        /// Human-readable failure description
        detail: String,
    },
}

impl SaveOutcome {
    /// Whether the entry was stored
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// The cache orchestrator: restore and save entry points over a blob store
#[derive(Debug)]
pub struct Cache<S = FilesystemStore> {
    store: Option<S>,
    config: CacheConfig,
}

impl Cache<FilesystemStore> {
    /// Build a filesystem-backed cache from configuration. A missing cache
    /// directory yields a storeless cache whose operations degrade to no-ops.
    #[must_use]
    pub fn from_config(config: CacheConfig) -> Self {
        let store = config
            .cache_dir
            .as_ref()
            .map(|root| FilesystemStore::new(root.clone(), config.scope()));
        Self { store, config }
    }
}

impl<S: BlobStore> Cache<S> {
    /// Build a cache over an explicit store. `None` models an unconfigured
    /// cache.
    #[must_use]
    pub fn with_store(store: Option<S>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    /// Restore the first entry matching `[primary_key, restore_keys...]` into
    /// the workspace.
    ///
    /// # Errors
    /// Returns `Error::Validation` for malformed keys or an empty path set.
    /// Environmental failures never error; they surface as
    /// [`RestoreOutcome::Degraded`].
    pub async fn restore(
        &self,
        paths: &[String],
        primary_key: &str,
        restore_keys: &[String],
        options: RestoreOptions,
    ) -> Result<RestoreOutcome> {
        key::validate_paths(paths)?;
        key::validate_key_list(primary_key, restore_keys)?;

        let Some(store) = &self.store else {
            tracing::debug!("no cache directory configured; treating restore as a miss");
            return Ok(RestoreOutcome::Miss);
        };

        let file_name = self.config.compression.archive_file_name();
        let mut hit = None;
        for candidate in
            std::iter::once(primary_key).chain(restore_keys.iter().map(String::as_str))
        {
            let address = store.locate(candidate).join(file_name);
            if store.exists(&address).await {
                tracing::debug!(
                    key = candidate,
                    address = %address.display(),
                    store = store.name(),
                    "cache hit"
                );
                hit = Some((candidate, address));
                break;
            }
            tracing::debug!(key = candidate, "cache miss");
        }

        let Some((matched, address)) = hit else {
            return Ok(RestoreOutcome::Miss);
        };

        if options.lookup_only {
            return Ok(RestoreOutcome::Hit {
                key: matched.to_string(),
                bytes: None,
            });
        }

        match self.download_and_unpack(store, &address).await {
            Ok(bytes) => Ok(RestoreOutcome::Hit {
                key: matched.to_string(),
                bytes: Some(bytes),
            }),
            Err(e) => {
                tracing::warn!(
                    key = matched,
                    error = %e,
                    "failed to restore cache entry; continuing without cache"
                );
                Ok(RestoreOutcome::Degraded {
                    detail: e.to_string(),
                })
            }
        }
    }

    /// Package the resolved path set and store it under `key`.
    ///
    /// # Errors
    /// Returns `Error::Validation` for malformed input, `Error::NothingToCache`
    /// when no paths resolve to existing files, and `Error::Capacity` when the
    /// archive exceeds the configured ceiling. Packaging and storage failures
    /// surface as [`SaveOutcome::Degraded`] instead of erroring.
    pub async fn save(&self, paths: &[String], key: &str) -> Result<SaveOutcome> {
        key::validate_paths(paths)?;
        key::validate_key(key)?;

        let Some(store) = &self.store else {
            tracing::debug!("no cache directory configured; skipping save");
            return Ok(SaveOutcome::Skipped);
        };

        let resolved = paths::resolve(&self.config.workspace, paths)?;
        if resolved.is_empty() {
            return Err(Error::NothingToCache);
        }

        let staging = staging_dir("stash-save-")?;
        let result = self.pack_and_store(store, key, &resolved, staging.path()).await;
        close_staging(staging);

        match result {
            Ok(bytes) => Ok(SaveOutcome::Saved {
                key: key.to_string(),
                bytes,
            }),
            Err(e) if e.is_degradable() => {
                tracing::warn!(
                    key,
                    error = %e,
                    "failed to save cache entry; continuing without cache"
                );
                Ok(SaveOutcome::Degraded {
                    detail: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn download_and_unpack(&self, store: &S, address: &Path) -> Result<u64> {
        let staging = staging_dir("stash-restore-")?;
        let dest = staging
            .path()
            .join(self.config.compression.archive_file_name());
        let result = self.transfer_and_unpack(store, address, &dest).await;
        close_staging(staging);
        result
    }

    async fn transfer_and_unpack(&self, store: &S, address: &Path, dest: &Path) -> Result<u64> {
        store.read(address, dest).await?;
        let bytes = archive::size_of(dest)?;
        if tracing::enabled!(tracing::Level::DEBUG) {
            for entry in archive::list(dest, self.config.compression)? {
                tracing::debug!(entry, "archive manifest entry");
            }
        }
        archive::unpack(dest, &self.config.workspace, self.config.compression)?;
        Ok(bytes)
    }

    async fn pack_and_store(
        &self,
        store: &S,
        key: &str,
        resolved: &[PathBuf],
        staging: &Path,
    ) -> Result<u64> {
        let method = self.config.compression;
        let archive_path = staging.join(method.archive_file_name());
        archive::pack(&self.config.workspace, resolved, &archive_path, method)?;

        let bytes = archive::size_of(&archive_path)?;
        if bytes > self.config.max_archive_bytes {
            return Err(Error::Capacity {
                size: bytes,
                limit: self.config.max_archive_bytes,
            });
        }

        let address = store.locate(key).join(method.archive_file_name());
        store.write(&address, &archive_path).await?;
        tracing::debug!(key, bytes, store = store.name(), "cache entry saved");
        Ok(bytes)
    }
}

fn staging_dir(prefix: &str) -> Result<TempDir> {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .map_err(|e| Error::io_no_path(e, "create staging directory"))
}

/// Staging removal runs on every exit path; a failed removal is logged and
/// swallowed so it can never mask the operation's outcome.
fn close_staging(staging: TempDir) {
    if let Err(e) = staging.close() {
        tracing::warn!(error = %e, "failed to remove staging directory");
    }
}
