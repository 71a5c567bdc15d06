//! Content-key artifact caching for stash
//!
//! This crate implements the restore/save protocol of the stash cache:
//! - Structural validation of cache keys and path sets
//! - Scope-namespaced blob storage behind the [`BlobStore`] seam
//! - Single-archive packaging and extraction of multi-path sets
//! - Orchestration with explicit hit/miss/degraded outcomes
//!
//! # Overview
//!
//! A save packages a set of workspace paths into one compressed archive and
//! stores it under an explicit key, namespaced by (repository, ref). A
//! restore probes an ordered key list — primary first, then fallbacks — and
//! unpacks the first entry that exists. The cache is an optimization: a
//! missing or broken entry degrades to a cold run, it never fails the
//! caller's workflow. Validation errors and oversized archives are caller
//! errors and do propagate.

mod error;

pub mod archive;
pub mod config;
pub mod key;
mod ops;
pub mod paths;
pub mod store;

// Re-export error types at crate root
pub use error::{Error, Result};

// Re-export main types
pub use archive::CompressionMethod;
pub use config::{CacheConfig, CacheScope, DEFAULT_MAX_ARCHIVE_BYTES};
pub use ops::{Cache, RestoreOptions, RestoreOutcome, SaveOutcome};
pub use store::{BlobStore, FilesystemStore};
