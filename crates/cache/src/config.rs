//! Cache configuration and scope resolution
//!
//! The host process builds a [`CacheConfig`] once (usually from the
//! environment) and injects it into the library. Nothing in the library reads
//! the environment directly, so every component is testable with synthetic
//! scopes.

use crate::archive::CompressionMethod;
use std::path::PathBuf;

/// Default archive size ceiling: 10 GiB
pub const DEFAULT_MAX_ARCHIVE_BYTES: u64 = 10 * 1024 * 1024 * 1024;

/// Namespace under which cache keys are stored, preventing cross-project
/// collisions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheScope {
    /// Owning repository identifier, e.g. `acme/widgets`
    pub repository: String,
    /// Ref or branch identifier, e.g. `main`
    pub ref_name: String,
}

/// Configuration for one cache host
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Root of the backing store; `None` means no cache is configured and
    /// every operation degrades to a no-op
    pub cache_dir: Option<PathBuf>,
    /// Owning repository identifier
    pub repository: String,
    /// Ref or branch identifier
    pub ref_name: String,
    /// Directory the cached paths are resolved against and restored into
    pub workspace: PathBuf,
    /// Archive compression method
    pub compression: CompressionMethod,
    /// Size ceiling for a single archive, in bytes
    pub max_archive_bytes: u64,
}

/// Raw environment inputs for deriving a [`CacheConfig`]
#[derive(Debug, Clone, Default)]
struct EnvInputs {
    cache_dir: Option<String>,
    repository: Option<String>,
    github_repository: Option<String>,
    ref_name: Option<String>,
    github_ref: Option<String>,
    compression: Option<String>,
}

fn config_from_inputs(inputs: EnvInputs, workspace: PathBuf) -> CacheConfig {
    let repository = inputs
        .repository
        .or(inputs.github_repository)
        .unwrap_or_else(|| "local".to_string());
    let ref_name = inputs
        .ref_name
        .or(inputs.github_ref)
        .unwrap_or_else(|| "default".to_string());
    let compression = inputs
        .compression
        .and_then(|s| {
            s.parse::<CompressionMethod>()
                .inspect_err(|e| tracing::warn!("{e}; using default compression"))
                .ok()
        })
        .unwrap_or_default();

    CacheConfig {
        cache_dir: inputs.cache_dir.map(PathBuf::from),
        repository,
        ref_name,
        workspace,
        compression,
        max_archive_bytes: DEFAULT_MAX_ARCHIVE_BYTES,
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl CacheConfig {
    /// Derive the configuration from the process environment.
    ///
    /// `STASH_CACHE_DIR` designates the store root; its absence is the sole
    /// signal that no cache is configured. Scope identifiers come from
    /// `STASH_REPOSITORY` / `STASH_REF`, falling back to the GitHub Actions
    /// equivalents when running under a workflow.
    #[must_use]
    pub fn from_env() -> Self {
        let workspace = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        config_from_inputs(
            EnvInputs {
                cache_dir: env_var("STASH_CACHE_DIR"),
                repository: env_var("STASH_REPOSITORY"),
                github_repository: env_var("GITHUB_REPOSITORY"),
                ref_name: env_var("STASH_REF"),
                github_ref: env_var("GITHUB_REF_NAME"),
                compression: env_var("STASH_COMPRESSION"),
            },
            workspace,
        )
    }

    /// The scope this configuration namespaces keys under
    #[must_use]
    pub fn scope(&self) -> CacheScope {
        CacheScope {
            repository: self.repository.clone(),
            ref_name: self.ref_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> EnvInputs {
        EnvInputs::default()
    }

    #[test]
    fn absent_cache_dir_means_unavailable() {
        let config = config_from_inputs(inputs(), PathBuf::from("/work"));
        assert!(config.cache_dir.is_none());
        assert_eq!(config.repository, "local");
        assert_eq!(config.ref_name, "default");
        assert_eq!(config.max_archive_bytes, DEFAULT_MAX_ARCHIVE_BYTES);
    }

    #[test]
    fn explicit_identifiers_win_over_github() {
        let config = config_from_inputs(
            EnvInputs {
                repository: Some("acme/widgets".into()),
                github_repository: Some("other/repo".into()),
                ref_name: Some("release".into()),
                github_ref: Some("main".into()),
                ..inputs()
            },
            PathBuf::from("/work"),
        );
        assert_eq!(config.repository, "acme/widgets");
        assert_eq!(config.ref_name, "release");
    }

    #[test]
    fn github_identifiers_fill_in() {
        let config = config_from_inputs(
            EnvInputs {
                github_repository: Some("acme/widgets".into()),
                github_ref: Some("main".into()),
                ..inputs()
            },
            PathBuf::from("/work"),
        );
        assert_eq!(config.scope().repository, "acme/widgets");
        assert_eq!(config.scope().ref_name, "main");
    }

    #[test]
    fn unknown_compression_falls_back_to_default() {
        let config = config_from_inputs(
            EnvInputs {
                compression: Some("lz4".into()),
                ..inputs()
            },
            PathBuf::from("/work"),
        );
        assert_eq!(config.compression, CompressionMethod::Zstd);
    }

    #[test]
    fn from_env_reads_the_process_environment() {
        temp_env::with_vars(
            [
                ("STASH_CACHE_DIR", Some("/var/cache/stash")),
                ("STASH_REPOSITORY", Some("acme/widgets")),
                ("STASH_REF", Some("main")),
                ("STASH_COMPRESSION", Some("gzip")),
            ],
            || {
                let config = CacheConfig::from_env();
                assert_eq!(config.cache_dir, Some(PathBuf::from("/var/cache/stash")));
                assert_eq!(config.repository, "acme/widgets");
                assert_eq!(config.ref_name, "main");
                assert_eq!(config.compression, CompressionMethod::Gzip);
            },
        );
    }

    #[test]
    fn blank_cache_dir_is_treated_as_unset() {
        temp_env::with_vars(
            [
                ("STASH_CACHE_DIR", Some("  ")),
                ("STASH_REPOSITORY", None),
                ("STASH_REF", None),
                ("GITHUB_REPOSITORY", None),
                ("GITHUB_REF_NAME", None),
            ],
            || {
                let config = CacheConfig::from_env();
                assert!(config.cache_dir.is_none());
            },
        );
    }
}
