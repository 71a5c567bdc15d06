//! Archive codec glue
//!
//! Packs a path set into a single compressed tar stream and back. The codec
//! itself is `tar` plus `zstd`/`flate2`; this module only sequences them and
//! keeps archive entries relative to the workspace root so an unpack
//! reproduces the original layout.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// zstd compression level, matching what works well for build artifacts
const ZSTD_LEVEL: i32 = 3;

/// Supported archive compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionMethod {
    /// gzip-compressed tar
    Gzip,
    /// zstd-compressed tar
    #[default]
    Zstd,
}

impl CompressionMethod {
    /// File name used for an archive of this method inside a cache entry
    #[must_use]
    pub fn archive_file_name(self) -> &'static str {
        match self {
            Self::Gzip => "cache.tgz",
            Self::Zstd => "cache.tzst",
        }
    }
}

impl std::str::FromStr for CompressionMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gzip" => Ok(Self::Gzip),
            "zstd" => Ok(Self::Zstd),
            _ => Err(format!("unknown compression method: {s}")),
        }
    }
}

/// Package `paths` (workspace-relative) into a single compressed archive at
/// `dest`
pub fn pack(
    workspace: &Path,
    paths: &[PathBuf],
    dest: &Path,
    method: CompressionMethod,
) -> Result<()> {
    let file = fs::File::create(dest).map_err(|e| Error::io(e, dest, "create"))?;
    match method {
        CompressionMethod::Zstd => {
            let enc = zstd::Encoder::new(file, ZSTD_LEVEL)
                .map_err(|e| Error::archive(format!("zstd encoder error: {e}")))?;
            let enc = append_entries(enc, workspace, paths)?;
            enc.finish()
                .map_err(|e| Error::archive(format!("zstd finish failed: {e}")))?;
        }
        CompressionMethod::Gzip => {
            let enc = flate2::write::GzEncoder::new(file, flate2::Compression::default());
            let enc = append_entries(enc, workspace, paths)?;
            enc.finish()
                .map_err(|e| Error::archive(format!("gzip finish failed: {e}")))?;
        }
    }
    Ok(())
}

fn append_entries<W: Write>(writer: W, workspace: &Path, paths: &[PathBuf]) -> Result<W> {
    let mut builder = tar::Builder::new(writer);
    for rel in paths {
        let name = if rel.as_os_str().is_empty() {
            Path::new(".")
        } else {
            rel.as_path()
        };
        let abs = workspace.join(rel);
        let meta = fs::symlink_metadata(&abs).map_err(|e| Error::io(e, &abs, "stat"))?;
        if meta.is_dir() {
            builder
                .append_dir_all(name, &abs)
                .map_err(|e| Error::archive(format!("tar append failed: {e}")))?;
        } else {
            builder
                .append_path_with_name(&abs, name)
                .map_err(|e| Error::archive(format!("tar append failed: {e}")))?;
        }
    }
    builder
        .into_inner()
        .map_err(|e| Error::archive(format!("tar finalize failed: {e}")))
}

/// Unpack `archive` into the workspace, restoring the packed layout
pub fn unpack(archive: &Path, workspace: &Path, method: CompressionMethod) -> Result<()> {
    let file = fs::File::open(archive).map_err(|e| Error::io(e, archive, "open"))?;
    match method {
        CompressionMethod::Zstd => {
            let dec = zstd::Decoder::new(file)
                .map_err(|e| Error::archive(format!("zstd decoder error: {e}")))?;
            extract(dec, workspace)
        }
        CompressionMethod::Gzip => extract(flate2::read::GzDecoder::new(file), workspace),
    }
}

fn extract<R: Read>(reader: R, workspace: &Path) -> Result<()> {
    tar::Archive::new(reader)
        .unpack(workspace)
        .map_err(|e| Error::archive(format!("tar extract failed: {e}")))
}

/// List the entry names of `archive`. Debug-mode reporting only; restores do
/// not depend on the manifest.
pub fn list(archive: &Path, method: CompressionMethod) -> Result<Vec<String>> {
    let file = fs::File::open(archive).map_err(|e| Error::io(e, archive, "open"))?;
    match method {
        CompressionMethod::Zstd => {
            let dec = zstd::Decoder::new(file)
                .map_err(|e| Error::archive(format!("zstd decoder error: {e}")))?;
            manifest(dec)
        }
        CompressionMethod::Gzip => manifest(flate2::read::GzDecoder::new(file)),
    }
}

fn manifest<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut archive = tar::Archive::new(reader);
    let mut names = Vec::new();
    let entries = archive
        .entries()
        .map_err(|e| Error::archive(format!("tar read failed: {e}")))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::archive(format!("tar read failed: {e}")))?;
        let path = entry
            .path()
            .map_err(|e| Error::archive(format!("tar entry path failed: {e}")))?;
        names.push(path.to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Size of a file in bytes
pub fn size_of(path: &Path) -> Result<u64> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| Error::io(e, path, "stat"))
}
