//! Path set resolution
//!
//! Caller paths may be literal or glob patterns. Resolution happens against
//! the workspace root and yields sorted, deduplicated workspace-relative
//! paths; entries outside the workspace root are rejected so an unpack can
//! never write outside it.

use crate::{Error, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Resolve a path set against the live file system.
///
/// Returns workspace-relative paths for every existing match; the result may
/// be empty when nothing matched.
pub fn resolve(workspace: &Path, paths: &[String]) -> Result<Vec<PathBuf>> {
    let mut resolved = BTreeSet::new();
    for raw in paths {
        let trimmed = raw.strip_prefix("./").unwrap_or(raw);
        let pattern = to_workspace_pattern(workspace, trimmed)?;
        let matches = glob::glob(&pattern)
            .map_err(|e| Error::validation(format!("invalid cache path pattern {raw}: {e}")))?;
        for path in matches.filter_map(std::result::Result::ok) {
            let rel = path.strip_prefix(workspace).map_err(|_| {
                Error::validation(format!(
                    "cache path {} is outside the workspace root {}",
                    path.display(),
                    workspace.display()
                ))
            })?;
            resolved.insert(rel.to_path_buf());
        }
    }
    Ok(resolved.into_iter().collect())
}

fn to_workspace_pattern(workspace: &Path, raw: &str) -> Result<String> {
    let candidate = Path::new(raw);
    let absolute = if candidate.is_absolute() {
        if !candidate.starts_with(workspace) {
            return Err(Error::validation(format!(
                "cache path {raw} is outside the workspace root {}",
                workspace.display()
            )));
        }
        candidate.to_path_buf()
    } else {
        workspace.join(candidate)
    };
    Ok(absolute.to_string_lossy().into_owned())
}
