//! Storage result types
//!
//! Defines result structures returned by storage operations.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub filename: String,
    pub size: u64,
    pub created: String,
    pub modified: String,
}

/// A file that has just been written to the upload directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub filename: String,
    pub path: String,
    pub size: u64,
}

/// Capacity report. `available` is signed because `used` may exceed the
/// configured total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageStats {
    pub used: u64,
    pub total: u64,
    pub available: i64,
}

impl StorageStats {
    pub fn new(used: u64, total: u64) -> Self {
        let available = i128::from(total) - i128::from(used);
        Self {
            used,
            total,
            available: available.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64,
        }
    }

    /// Stats reported when the upload directory cannot be measured
    pub fn unmeasured(total: u64) -> Self {
        Self::new(0, total)
    }
}

/// Result of a directory listing.
///
/// Callers at the HTTP boundary turn `Unavailable` into an empty list; the
/// variant exists so that choice is made explicitly.
#[derive(Debug)]
pub enum ListOutcome {
    Listed(Vec<FileEntry>),
    Unavailable(StorageError),
}

impl ListOutcome {
    pub fn into_entries(self) -> Vec<FileEntry> {
        match self {
            ListOutcome::Listed(entries) => entries,
            ListOutcome::Unavailable(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_goes_negative_when_over_capacity() {
        let stats = StorageStats::new(150, 100);
        assert_eq!(stats.available, -50);
    }

    #[test]
    fn unmeasured_reports_full_capacity() {
        let stats = StorageStats::unmeasured(42);
        assert_eq!(stats, StorageStats { used: 0, total: 42, available: 42 });
    }
}
