//! Route table

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

use crate::middleware::log_request;
use crate::protocol::{delete_file, health, list_files, retrieve_file, upload_file};
use crate::server::NodeState;

/// Build the storage node router.
///
/// Uploads have no body limit at this layer; a reverse proxy in front of
/// the node is expected to cap request sizes.
pub fn router(state: NodeState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/upload",
            post(upload_file).layer(DefaultBodyLimit::disable()),
        )
        .route("/files", get(list_files))
        .route("/files/{filename}", get(retrieve_file).delete(delete_file))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
