//! Shared request state
//!
//! Everything a handler needs, cloned into every request. Nothing in here
//! is mutable; the filesystem is the only shared state between requests.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::NodeConfig;
use crate::storage::StorageLayout;

#[derive(Debug, Clone)]
pub struct NodeState {
    pub layout: Arc<StorageLayout>,
    pub capacity_bytes: u64,
}

impl NodeState {
    pub fn new(root: impl Into<PathBuf>, capacity_bytes: u64) -> Self {
        Self {
            layout: Arc::new(StorageLayout::new(root)),
            capacity_bytes,
        }
    }

    pub fn from_config(config: &NodeConfig) -> Self {
        Self::new(config.storage_root(), config.capacity_bytes)
    }
}
