//! The download step: mirror one resource from the server into the output directory.
//!
//! Existing files are never re-fetched. Bodies are written to `<target>.part`
//! and renamed into place, so an interrupted write cannot leave a truncated
//! file that a later run would mistake for a finished one.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::fetch::{Fetch, FetchError};
use crate::resource_path::ResourcePath;

/// Suffix of the temporary file written before the atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Why a single download failed. Never fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("HTTP {0}")]
    Http(u32),
    #[error(transparent)]
    Transport(#[from] FetchError),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of the download step for one path.
#[derive(Debug)]
pub enum DownloadOutcome {
    Downloaded { bytes: u64 },
    AlreadyExists,
    NotFound,
    Failed(DownloadError),
}

impl fmt::Display for DownloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadOutcome::Downloaded { bytes } => write!(f, "downloaded ({} bytes)", bytes),
            DownloadOutcome::AlreadyExists => write!(f, "already exists, skipped"),
            DownloadOutcome::NotFound => write!(f, "not found on server"),
            DownloadOutcome::Failed(e) => write!(f, "failed: {}", e),
        }
    }
}

/// Path for the temp file: appends `.part` to the final path.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Writes `data` to `<target>.part`, then renames it over `target`.
pub(crate) fn write_atomic(target: &Path, data: &[u8]) -> Result<(), DownloadError> {
    let tmp = temp_path(target);
    let result = fs::write(&tmp, data).and_then(|()| fs::rename(&tmp, target));
    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(DownloadError::Io {
            path: target.to_path_buf(),
            source,
        });
    }
    Ok(())
}

pub(crate) fn ensure_parent(target: &Path) -> Result<(), DownloadError> {
    let Some(parent) = target.parent() else {
        return Ok(());
    };
    if parent.exists() {
        return Ok(());
    }
    tracing::debug!("creating dir {}", parent.display());
    fs::create_dir_all(parent).map_err(|source| DownloadError::Io {
        path: parent.to_path_buf(),
        source,
    })
}

/// Creates the parent of `target` if needed and writes `data` atomically.
pub(crate) fn save_file(target: &Path, data: &[u8]) -> Result<(), DownloadError> {
    ensure_parent(target)?;
    write_atomic(target, data)
}

/// Downloads `path` into `output_dir` unless the mirrored file already exists.
pub fn download_resource(
    fetcher: &dyn Fetch,
    output_dir: &Path,
    path: &ResourcePath,
) -> DownloadOutcome {
    let target = path.local_under(output_dir);

    if let Err(e) = ensure_parent(&target) {
        return DownloadOutcome::Failed(e);
    }
    if target.exists() {
        return DownloadOutcome::AlreadyExists;
    }

    let response = match fetcher.get(path) {
        Ok(r) => r,
        Err(e) => return DownloadOutcome::Failed(e.into()),
    };
    if response.is_not_found() {
        return DownloadOutcome::NotFound;
    }
    if !response.is_success() {
        return DownloadOutcome::Failed(DownloadError::Http(response.status));
    }

    match write_atomic(&target, &response.body) {
        Ok(()) => DownloadOutcome::Downloaded {
            bytes: response.body.len() as u64,
        },
        Err(e) => DownloadOutcome::Failed(e),
    }
}
