//! File system storage management
//!
//! Handles the upload directory layout, filename validation and the
//! blocking filesystem operations behind list, delete and stats.

pub mod filesystem;
pub mod operations;
pub mod results;
pub mod validation;

pub use filesystem::StorageLayout;
pub use operations::{delete_file, ensure_upload_dir, list_files, storage_stats};
pub use results::{FileEntry, ListOutcome, StorageStats, StoredFile};
pub use validation::validate_filename;
