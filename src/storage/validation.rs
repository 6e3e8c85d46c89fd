//! Filename validation
//!
//! The filename is the only identifier a stored file has, so it must never
//! be able to name anything outside the upload directory.

use crate::error::StorageError;

/// Longest name most filesystems accept for a single component
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Check that `filename` is a single, plain path component
pub fn validate_filename(filename: &str) -> Result<&str, StorageError> {
    if filename.is_empty() {
        return Err(StorageError::InvalidFilename("empty filename".into()));
    }

    if filename == "." || filename == ".." {
        return Err(StorageError::InvalidFilename(format!(
            "'{}' is not a file name",
            filename
        )));
    }

    if filename.contains(['/', '\\']) {
        return Err(StorageError::InvalidFilename(format!(
            "'{}' contains a path separator",
            filename
        )));
    }

    if filename.contains('\0') {
        return Err(StorageError::InvalidFilename("filename contains NUL".into()));
    }

    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(StorageError::InvalidFilename(format!(
            "filename longer than {} bytes",
            MAX_FILENAME_LENGTH
        )));
    }

    Ok(filename)
}
