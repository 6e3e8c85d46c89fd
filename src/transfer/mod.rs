//! Transfer module
//!
//! Moves file payloads between HTTP bodies and the upload directory.

pub mod file_ops;
pub mod results;

pub use file_ops::{open_download, receive_upload};
pub use results::Download;
