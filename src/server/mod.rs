//! Server core functionality
//!
//! Shared request state, route table, listener and shutdown handling.

pub mod state;
pub mod core;
pub mod routes;

pub use state::NodeState;
pub use self::core::Server;
pub use routes::router;
