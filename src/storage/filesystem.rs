//! File system layout
//!
//! Resolves where stored and in-flight files live under the storage root.

use std::fs;
use std::io::Result;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::StorageError;
use crate::storage::validation::validate_filename;

const UPLOAD_DIR: &str = "uploads";
// Renamed into UPLOAD_DIR when complete, so both must sit on the same
// filesystem. Mounting `uploads/` as its own volume makes every upload fail
// with EXDEV; mount the storage root instead.
const PARTIAL_DIR: &str = ".partial";

static PARTIAL_SEQ: AtomicU64 = AtomicU64::new(0);

/// Directory layout rooted at the configured storage path
#[derive(Debug, Clone)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<root>/uploads`, the only directory clients can see
    pub fn upload_dir(&self) -> PathBuf {
        self.root.join(UPLOAD_DIR)
    }

    /// `<root>/.partial`, staging area for uploads still being received
    pub fn partial_dir(&self) -> PathBuf {
        self.root.join(PARTIAL_DIR)
    }

    /// Resolve a client-supplied filename to its location in the upload directory
    pub fn file_path(&self, filename: &str) -> std::result::Result<PathBuf, StorageError> {
        let name = validate_filename(filename)?;
        Ok(self.upload_dir().join(name))
    }

    /// A fresh staging path for an incoming upload.
    ///
    /// Unique per call so concurrent uploads of the same name never share a
    /// partial file; the final rename decides which one wins. The client
    /// filename is left out so any name valid in `uploads/` stays valid here.
    pub fn partial_path(&self) -> PathBuf {
        let seq = PARTIAL_SEQ.fetch_add(1, Ordering::Relaxed);
        self.partial_dir()
            .join(format!("{}-{}.tmp", std::process::id(), seq))
    }
}

/// Create a directory and any missing parents
pub fn create_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_resolve_inside_upload_dir() {
        let layout = StorageLayout::new("/data");
        assert_eq!(layout.upload_dir(), PathBuf::from("/data/uploads"));
        assert_eq!(
            layout.file_path("a.txt").unwrap(),
            PathBuf::from("/data/uploads/a.txt")
        );
    }

    #[test]
    fn traversal_names_do_not_resolve() {
        let layout = StorageLayout::new("/data");
        assert!(layout.file_path("../etc/passwd").is_err());
        assert!(layout.file_path("..").is_err());
    }

    #[test]
    fn partial_paths_are_unique_and_outside_uploads() {
        let layout = StorageLayout::new("/data");
        let first = layout.partial_path();
        let second = layout.partial_path();
        assert_ne!(first, second);
        assert!(first.starts_with(layout.partial_dir()));
        assert!(!first.starts_with(layout.upload_dir()));
    }

    #[test]
    fn partial_dir_shares_root_with_upload_dir() {
        let layout = StorageLayout::new("/data");
        assert_eq!(layout.partial_dir().parent(), layout.upload_dir().parent());
        assert_eq!(layout.partial_dir().parent(), Some(Path::new("/data")));
    }

    #[test]
    fn partial_path_length_does_not_depend_on_filename() {
        let layout = StorageLayout::new("/data");
        let name = layout.partial_path();
        let file_name = name.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.ends_with(".tmp"));
        assert!(file_name.len() < 64);
    }
}
