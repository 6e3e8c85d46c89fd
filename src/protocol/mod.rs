//! HTTP protocol layer
//!
//! Request handlers and the JSON bodies they return.

pub mod handlers;
pub mod responses;

pub use handlers::{delete_file, health, list_files, retrieve_file, upload_file};
