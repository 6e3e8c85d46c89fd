//! Module `file_ops`
//!
//! Streams uploaded payloads onto disk and opens stored files for download.
//! Uploads are written to a partial file first and renamed into the upload
//! directory once the whole payload has arrived.

use axum::extract::multipart::Field;
use log::{debug, error, info};
use std::path::Path;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::error::{NodeError, StorageError};
use crate::storage::{StorageLayout, StoredFile};
use crate::transfer::results::Download;

/// Receives the body of a multipart `file` field into `<uploads>/<filename>`,
/// replacing any file already stored under that name.
pub async fn receive_upload(
    layout: &StorageLayout,
    filename: &str,
    field: &mut Field<'_>,
) -> Result<StoredFile, NodeError> {
    let final_path = layout.file_path(filename)?;
    fs::create_dir_all(layout.upload_dir()).await?;
    fs::create_dir_all(layout.partial_dir()).await?;

    let partial_path = layout.partial_path();
    info!(
        "Starting upload: {} -> {}",
        partial_path.display(),
        final_path.display()
    );

    let size = match write_partial(&partial_path, field).await {
        Ok(size) => size,
        Err(e) => {
            let _ = fs::remove_file(&partial_path).await;
            return Err(e);
        }
    };

    if let Err(e) = fs::rename(&partial_path, &final_path).await {
        error!(
            "Failed to move {} to {}: {}",
            partial_path.display(),
            final_path.display(),
            e
        );
        let _ = fs::remove_file(&partial_path).await;
        return Err(e.into());
    }

    info!("Upload completed: {} ({} bytes)", final_path.display(), size);

    Ok(StoredFile {
        filename: filename.to_string(),
        path: final_path.to_string_lossy().into_owned(),
        size,
    })
}

async fn write_partial(partial_path: &Path, field: &mut Field<'_>) -> Result<u64, NodeError> {
    let mut file = File::create(partial_path).await?;
    let mut written = 0u64;

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| NodeError::MalformedUpload(e.to_string()))?
    {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(written)
}

/// Probes and opens a stored file for streaming.
///
/// Every failure collapses into `FileNotFound`: callers cannot tell an
/// invalid name from a missing file or one deleted mid-request.
pub async fn open_download(layout: &StorageLayout, id: &str) -> Result<Download, NodeError> {
    let path = layout.file_path(id).map_err(not_found)?;

    // Size and body must come from the same inode; a concurrent upload may
    // rename a new file over `path` at any point.
    let file = File::open(&path).await.map_err(not_found)?;
    let metadata = file.metadata().await.map_err(not_found)?;
    if !metadata.is_file() {
        return Err(not_found(StorageError::NotAFile(id.to_string())));
    }

    let content_type = mime_guess::from_path(&path).first_or_octet_stream();

    Ok(Download {
        file,
        size: metadata.len(),
        content_type,
    })
}

fn not_found(err: impl Into<StorageError>) -> NodeError {
    let err: StorageError = err.into();
    debug!("Retrieve failed: {}", err);
    NodeError::FileNotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn download_size_matches_opened_file_after_overwrite() {
        let dir = TempDir::new().unwrap();
        let layout = StorageLayout::new(dir.path());
        fs::create_dir_all(layout.upload_dir()).await.unwrap();
        fs::write(layout.upload_dir().join("a.txt"), b"short").await.unwrap();

        let mut download = open_download(&layout, "a.txt").await.unwrap();

        // A same-name upload lands after the file was opened
        let replacement = dir.path().join("replacement");
        fs::write(&replacement, b"a much longer payload").await.unwrap();
        fs::rename(&replacement, layout.upload_dir().join("a.txt")).await.unwrap();

        let mut body = Vec::new();
        download.file.read_to_end(&mut body).await.unwrap();
        assert_eq!(body, b"short");
        assert_eq!(download.size, body.len() as u64);
    }

    #[tokio::test]
    async fn download_of_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let layout = StorageLayout::new(dir.path());
        fs::create_dir_all(layout.upload_dir().join("nested")).await.unwrap();

        let err = open_download(&layout, "nested").await.unwrap_err();
        assert!(matches!(err, NodeError::FileNotFound));
    }
}
