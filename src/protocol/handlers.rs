//! HTTP handlers
//!
//! One handler per storage node endpoint. Directory scans and deletes run on
//! the blocking pool; uploads and downloads stream through `tokio::fs`.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use tokio::task;
use tokio_util::io::ReaderStream;

use crate::error::NodeError;
use crate::protocol::responses::{
    DeleteResponse, FILE_DELETED, HealthResponse, ListResponse, UnhealthyResponse, UploadResponse,
};
use crate::server::NodeState;
use crate::storage::{self, ListOutcome};
use crate::transfer::{open_download, receive_upload};

const FILE_FIELD: &str = "file";

/// `GET /health`
pub async fn health(State(state): State<NodeState>) -> Response {
    let layout = state.layout.clone();
    let capacity = state.capacity_bytes;

    match task::spawn_blocking(move || storage::storage_stats(&layout, capacity)).await {
        Ok(stats) => Json(HealthResponse::healthy(stats)).into_response(),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnhealthyResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

/// `POST /upload` with a multipart `file` part
pub async fn upload_file(
    State(state): State<NodeState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, NodeError> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| NodeError::MalformedUpload(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // Without a filename the part is a plain form value, not a file.
        // Browsers send `filename=""` when no file was picked.
        let Some(filename) = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
        else {
            continue;
        };

        let stored = receive_upload(&state.layout, &filename, &mut field).await?;
        return Ok(Json(UploadResponse {
            success: true,
            file: stored,
        }));
    }

    Err(NodeError::NoFileUploaded)
}

/// `GET /files/{id}` streams the stored file named `id`
pub async fn retrieve_file(
    State(state): State<NodeState>,
    Path(id): Path<String>,
) -> Result<Response, NodeError> {
    let download = open_download(&state.layout, &id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, download.content_type.to_string()),
            (header::CONTENT_LENGTH, download.size.to_string()),
        ],
        Body::from_stream(ReaderStream::new(download.file)),
    )
        .into_response())
}

/// `DELETE /files/{filename}`
pub async fn delete_file(
    State(state): State<NodeState>,
    Path(filename): Path<String>,
) -> Result<Json<DeleteResponse>, NodeError> {
    let layout = state.layout.clone();
    task::spawn_blocking(move || storage::delete_file(&layout, &filename)).await??;

    Ok(Json(DeleteResponse {
        success: true,
        message: FILE_DELETED.to_string(),
    }))
}

/// `GET /files`. Always succeeds; an unreadable directory lists as empty.
pub async fn list_files(State(state): State<NodeState>) -> Json<ListResponse> {
    let layout = state.layout.clone();

    let outcome = match task::spawn_blocking(move || storage::list_files(&layout)).await {
        Ok(outcome) => outcome,
        Err(e) => ListOutcome::Unavailable(std::io::Error::other(e.to_string()).into()),
    };

    if let ListOutcome::Unavailable(e) = &outcome {
        warn!("Listing unavailable, returning empty list: {}", e);
    }

    Json(ListResponse {
        success: true,
        files: outcome.into_entries(),
    })
}
