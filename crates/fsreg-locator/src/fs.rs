//! Leaf filesystem helpers used by the locator.
//!
//! Existence checks treat a missing path as `false` and surface every other
//! I/O failure, so a permission problem is never mistaken for "not found".

use std::fs::{self, Metadata};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{LocatorError, Result};

/// Kind of directory entry to keep when listing a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    /// Regular files only.
    File,
    /// Directories only.
    Directory,
}

/// A directory entry together with its metadata.
#[derive(Debug, Clone)]
pub struct DirItem {
    /// Full path of the entry (directory joined with the entry name).
    pub path: PathBuf,
    /// Metadata of the entry, following symlinks.
    pub metadata: Metadata,
}

/// Returns true if `path` exists and is a directory.
///
/// # Errors
///
/// Returns any I/O error other than [`ErrorKind::NotFound`].
pub fn is_directory(path: &Path) -> io::Result<bool> {
    stat(path).map(|m| m.is_some_and(|m| m.is_dir()))
}

/// Returns true if `path` exists and is a regular file.
///
/// # Errors
///
/// Returns any I/O error other than [`ErrorKind::NotFound`].
pub fn is_file(path: &Path) -> io::Result<bool> {
    stat(path).map(|m| m.is_some_and(|m| m.is_file()))
}

fn stat(path: &Path) -> io::Result<Option<Metadata>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Lists the entries of `dir`, optionally keeping only one kind of item.
///
/// Entries whose metadata cannot be read (dangling symlinks, entries removed
/// mid-listing) are skipped.
///
/// # Errors
///
/// Returns an error if the directory itself cannot be read.
pub fn list_dir(dir: &Path, item_type: Option<ItemType>) -> io::Result<Vec<DirItem>> {
    let mut items = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        let keep = match item_type {
            Some(ItemType::File) => metadata.is_file(),
            Some(ItemType::Directory) => metadata.is_dir(),
            None => true,
        };
        if keep {
            items.push(DirItem { path, metadata });
        }
    }
    Ok(items)
}

/// Reads and parses a JSON file.
///
/// # Errors
///
/// Returns [`LocatorError::Io`] if the file cannot be read and
/// [`LocatorError::Json`] if it does not deserialize into `T`.
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).map_err(|e| LocatorError::io(path, e))?;
    serde_json::from_str(&data).map_err(|e| LocatorError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_path_is_neither_file_nor_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        assert!(!is_directory(&missing).unwrap());
        assert!(!is_file(&missing).unwrap());
    }

    #[test]
    fn test_is_directory_and_is_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();

        assert!(is_directory(dir.path()).unwrap());
        assert!(!is_file(dir.path()).unwrap());
        assert!(is_file(&file).unwrap());
        assert!(!is_directory(&file).unwrap());
    }

    #[test]
    fn test_list_dir_filters_by_item_type() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.zip"), "1").unwrap();
        fs::write(dir.path().join("two.zip"), "2").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        assert_eq!(list_dir(dir.path(), None).unwrap().len(), 3);
        assert_eq!(list_dir(dir.path(), Some(ItemType::File)).unwrap().len(), 2);

        let dirs = list_dir(dir.path(), Some(ItemType::Directory)).unwrap();
        assert_eq!(dirs.len(), 1);
        assert_eq!(dirs[0].path, dir.path().join("nested"));
    }

    #[cfg(unix)]
    #[test]
    fn test_list_dir_skips_dangling_symlinks() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.zip"), "1").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("stale")).unwrap();

        let items = list_dir(dir.path(), None).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].path, dir.path().join("one.zip"));
    }

    #[test]
    fn test_list_dir_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = list_dir(&dir.path().join("missing"), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_load_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("aliases.json");
        fs::write(&path, r#"{"foo": "bar"}"#).unwrap();

        let map: HashMap<String, String> = load_json_file(&path).unwrap();
        assert_eq!(map.get("foo").map(String::as_str), Some("bar"));
    }

    #[test]
    fn test_load_json_file_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        let result: Result<serde_json::Value> = load_json_file(&missing);
        assert!(matches!(result, Err(LocatorError::Io { .. })));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{not json").unwrap();
        let result: Result<serde_json::Value> = load_json_file(&broken);
        assert!(matches!(result, Err(LocatorError::Json { .. })));
    }
}
