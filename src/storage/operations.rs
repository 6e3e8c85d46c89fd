//! Storage operations
//!
//! Blocking filesystem operations behind the list, delete and health
//! endpoints. Handlers run these on tokio's blocking pool.

use log::{debug, info, warn};
use std::fs;
use std::path::PathBuf;

use crate::error::StorageError;
use crate::storage::filesystem::{StorageLayout, create_directory};
use crate::storage::results::{FileEntry, ListOutcome, StorageStats};
use crate::utils::iso_timestamp;

/// Create the upload directory if it does not exist yet
pub fn ensure_upload_dir(layout: &StorageLayout) -> Result<PathBuf, StorageError> {
    let upload_dir = layout.upload_dir();
    create_directory(&upload_dir)?;
    Ok(upload_dir)
}

/// Lists every entry of the upload directory with its size and timestamps.
///
/// A failure to read the directory or to stat any single entry makes the
/// whole listing `Unavailable`.
pub fn list_files(layout: &StorageLayout) -> ListOutcome {
    match try_list_files(layout) {
        Ok(entries) => {
            debug!(
                "Listed {} ({} entries)",
                layout.upload_dir().display(),
                entries.len()
            );
            ListOutcome::Listed(entries)
        }
        Err(e) => ListOutcome::Unavailable(e),
    }
}

fn try_list_files(layout: &StorageLayout) -> Result<Vec<FileEntry>, StorageError> {
    let upload_dir = ensure_upload_dir(layout)?;

    let mut entries = Vec::new();
    for entry in fs::read_dir(&upload_dir)? {
        let entry = entry?;
        let metadata = fs::metadata(entry.path())?;
        let modified = metadata.modified()?;
        // Birth time is not recorded everywhere
        let created = metadata.created().unwrap_or(modified);

        entries.push(FileEntry {
            filename: entry.file_name().to_string_lossy().into_owned(),
            size: metadata.len(),
            created: iso_timestamp(created),
            modified: iso_timestamp(modified),
        });
    }

    entries.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(entries)
}

/// Sums the sizes of regular files in the upload directory against the
/// configured capacity. Never fails: unreadable storage reports zero usage.
pub fn storage_stats(layout: &StorageLayout, capacity_bytes: u64) -> StorageStats {
    match used_bytes(layout) {
        Ok(used) => StorageStats::new(used, capacity_bytes),
        Err(e) => {
            warn!(
                "Failed to measure {}: {}; reporting zero usage",
                layout.upload_dir().display(),
                e
            );
            StorageStats::unmeasured(capacity_bytes)
        }
    }
}

fn used_bytes(layout: &StorageLayout) -> Result<u64, StorageError> {
    let upload_dir = ensure_upload_dir(layout)?;

    let mut used = 0u64;
    for entry in fs::read_dir(&upload_dir)? {
        let metadata = fs::metadata(entry?.path())?;
        if metadata.is_file() {
            used += metadata.len();
        }
    }

    Ok(used)
}

/// Deletes a file from the upload directory.
///
/// Removal is attempted unconditionally; a missing file surfaces as the
/// underlying I/O error like any other failure.
pub fn delete_file(layout: &StorageLayout, filename: &str) -> Result<PathBuf, StorageError> {
    let file_path = layout.file_path(filename)?;

    fs::remove_file(&file_path)?;
    info!("Deleted file {} ({})", filename, file_path.display());

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn layout_with_files(files: &[(&str, usize)]) -> (TempDir, StorageLayout) {
        let dir = TempDir::new().unwrap();
        let layout = StorageLayout::new(dir.path());
        let upload_dir = ensure_upload_dir(&layout).unwrap();
        for (name, size) in files {
            fs::write(upload_dir.join(name), vec![b'x'; *size]).unwrap();
        }
        (dir, layout)
    }

    #[test]
    fn ensure_upload_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let layout = StorageLayout::new(dir.path().join("nested/root"));
        ensure_upload_dir(&layout).unwrap();
        ensure_upload_dir(&layout).unwrap();
        assert!(layout.upload_dir().is_dir());
    }

    #[test]
    fn stats_sum_regular_files_only() {
        let (_dir, layout) = layout_with_files(&[("a", 10), ("b", 20), ("c", 30)]);
        fs::create_dir(layout.upload_dir().join("subdir")).unwrap();
        fs::write(layout.upload_dir().join("subdir/ignored"), [0u8; 99]).unwrap();

        let stats = storage_stats(&layout, 1000);
        assert_eq!(stats, StorageStats { used: 60, total: 1000, available: 940 });
    }

    #[test]
    fn stats_create_missing_directory() {
        let dir = TempDir::new().unwrap();
        let layout = StorageLayout::new(dir.path().join("fresh"));
        let stats = storage_stats(&layout, 500);
        assert_eq!(stats, StorageStats::unmeasured(500));
        assert!(layout.upload_dir().is_dir());
    }

    #[test]
    fn stats_fall_back_when_root_is_unusable() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"file").unwrap();
        let layout = StorageLayout::new(&blocker);

        assert_eq!(storage_stats(&layout, 77), StorageStats::unmeasured(77));
    }

    #[test]
    fn listing_reports_sizes_sorted_by_name() {
        let (_dir, layout) = layout_with_files(&[("b.bin", 3), ("a.txt", 5)]);
        let entries = match list_files(&layout) {
            ListOutcome::Listed(entries) => entries,
            ListOutcome::Unavailable(e) => panic!("listing failed: {e}"),
        };

        let summary: Vec<_> = entries.iter().map(|e| (e.filename.as_str(), e.size)).collect();
        assert_eq!(summary, vec![("a.txt", 5), ("b.bin", 3)]);
        assert!(entries[0].modified.ends_with('Z'));
    }

    #[test]
    fn listing_unusable_root_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"file").unwrap();
        let layout = StorageLayout::new(&blocker);

        let outcome = list_files(&layout);
        assert!(matches!(outcome, ListOutcome::Unavailable(_)));
        assert!(outcome.into_entries().is_empty());
    }

    #[test]
    fn delete_removes_file() {
        let (_dir, layout) = layout_with_files(&[("gone.txt", 4)]);
        let path = delete_file(&layout, "gone.txt").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn delete_missing_file_is_io_error() {
        let (_dir, layout) = layout_with_files(&[]);
        let err = delete_file(&layout, "never.txt").unwrap_err();
        assert!(matches!(err, StorageError::IoError(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    fn delete_rejects_traversal() {
        let (_dir, layout) = layout_with_files(&[]);
        let err = delete_file(&layout, "..").unwrap_err();
        assert!(matches!(err, StorageError::InvalidFilename(_)));
    }
}
