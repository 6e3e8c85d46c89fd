//! HTTP response bodies
//!
//! JSON shapes returned by the storage node endpoints.

use serde::{Deserialize, Serialize};

use crate::storage::{FileEntry, StorageStats, StoredFile};
use crate::utils::now_timestamp;

pub const STATUS_HEALTHY: &str = "healthy";
pub const STATUS_UNHEALTHY: &str = "unhealthy";
pub const FILE_DELETED: &str = "File deleted";

/// `{success:false, error}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub storage: StorageStats,
}

impl HealthResponse {
    pub fn healthy(storage: StorageStats) -> Self {
        Self {
            status: STATUS_HEALTHY.to_string(),
            timestamp: now_timestamp(),
            storage,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

impl UnhealthyResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: STATUS_UNHEALTHY.to_string(),
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub file: StoredFile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    pub files: Vec<FileEntry>,
}
