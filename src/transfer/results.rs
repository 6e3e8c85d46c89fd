//! Transfer result types

use mime_guess::Mime;
use tokio::fs::File;

/// A stored file opened for streaming to the client
#[derive(Debug)]
pub struct Download {
    pub file: File,
    pub size: u64,
    pub content_type: Mime,
}
