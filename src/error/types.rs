//! Error types
//!
//! Defines domain-specific error types for the storage layer and the HTTP layer.

use std::fmt;
use std::io;

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    InvalidFilename(String),
    FileNotFound(String),
    NotAFile(String),
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::InvalidFilename(reason) => write!(f, "Invalid filename: {}", reason),
            StorageError::FileNotFound(name) => write!(f, "File not found: {}", name),
            StorageError::NotAFile(name) => write!(f, "Not a regular file: {}", name),
            // The raw OS message is what callers see on a 500.
            StorageError::IoError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// Request-level errors returned by the HTTP handlers
#[derive(Debug)]
pub enum NodeError {
    /// Upload request carried no `file` part
    NoFileUploaded,
    /// Request body could not be parsed as multipart
    MalformedUpload(String),
    /// Retrieval failed for any reason; callers only learn "not found"
    FileNotFound,
    Storage(StorageError),
    /// A blocking storage task panicked or was cancelled
    TaskFailed(String),
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeError::NoFileUploaded => write!(f, "No file uploaded"),
            NodeError::MalformedUpload(msg) => write!(f, "Malformed upload: {}", msg),
            NodeError::FileNotFound => write!(f, "File not found"),
            NodeError::Storage(e) => write!(f, "{}", e),
            NodeError::TaskFailed(msg) => write!(f, "Storage task failed: {}", msg),
        }
    }
}

impl std::error::Error for NodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NodeError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for NodeError {
    fn from(error: StorageError) -> Self {
        NodeError::Storage(error)
    }
}

impl From<io::Error> for NodeError {
    fn from(error: io::Error) -> Self {
        NodeError::Storage(StorageError::IoError(error))
    }
}

impl From<tokio::task::JoinError> for NodeError {
    fn from(error: tokio::task::JoinError) -> Self {
        NodeError::TaskFailed(error.to_string())
    }
}
