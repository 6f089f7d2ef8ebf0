//! Zip extraction for release archives.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;

use crate::error::{LocatorError, Result};

/// Opens `archive` for reading.
///
/// # Errors
///
/// Returns [`LocatorError::ArchiveUnavailable`] if the file is missing or
/// unreadable.
pub fn open(archive: &Path) -> Result<File> {
    File::open(archive).map_err(|e| LocatorError::ArchiveUnavailable {
        path: archive.to_path_buf(),
        source: e,
    })
}

/// Extracts an opened archive into `target_dir`.
///
/// The zip work runs on the blocking pool; the returned future completes
/// exactly once with either success or the first failure.
///
/// # Errors
///
/// Returns [`LocatorError::Extraction`] if the archive is corrupt or an entry
/// cannot be written, and [`LocatorError::Task`] if the blocking task dies.
pub async fn extract(file: File, archive: PathBuf, target_dir: PathBuf) -> Result<()> {
    tokio::task::spawn_blocking(move || extract_sync(file, &archive, &target_dir)).await?
}

fn extract_sync(file: File, archive: &Path, target_dir: &Path) -> Result<()> {
    let extraction_error = |source| LocatorError::Extraction {
        path: archive.to_path_buf(),
        source,
    };

    let mut zip = ZipArchive::new(file).map_err(extraction_error)?;
    debug!(
        archive = %archive.display(),
        target = %target_dir.display(),
        entries = zip.len(),
        "Extracting archive"
    );
    zip.extract(target_dir).map_err(extraction_error)
}
