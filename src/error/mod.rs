//! Error handling
//!
//! Defines the node's error types and their HTTP mapping.

pub mod handlers;
pub mod types;

pub use handlers::error_to_status;
pub use types::*;
