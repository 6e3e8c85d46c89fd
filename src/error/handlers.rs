//! Error handlers
//!
//! Maps node errors onto HTTP status codes and `{success:false, error}` bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{debug, error, warn};

use crate::error::types::{NodeError, StorageError};
use crate::protocol::responses::ErrorBody;

/// Convert an error to its HTTP status code
pub fn error_to_status(err: &NodeError) -> StatusCode {
    match err {
        NodeError::NoFileUploaded => StatusCode::BAD_REQUEST,
        NodeError::MalformedUpload(_) => StatusCode::BAD_REQUEST,
        NodeError::FileNotFound => StatusCode::NOT_FOUND,
        NodeError::Storage(StorageError::InvalidFilename(_)) => StatusCode::BAD_REQUEST,
        NodeError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        NodeError::TaskFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log an error at a level matching its severity
pub fn handle_error(err: &NodeError) {
    match error_to_status(err) {
        StatusCode::INTERNAL_SERVER_ERROR => error!("Storage node error: {}", err),
        StatusCode::NOT_FOUND => debug!("Client error: {}", err),
        _ => warn!("Client error: {}", err),
    }
}

impl IntoResponse for NodeError {
    fn into_response(self) -> Response {
        handle_error(&self);
        let status = error_to_status(&self);
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
