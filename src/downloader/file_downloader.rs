use crate::credentials::Credentials;
use crate::errors::{AppError, AppResult};
use crate::ui;
use reqwest::StatusCode;
use std::path::Path;
use tokio::fs;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use url::Url;

/// Streams an authenticated GET of `url` into `file_path`.
///
/// The body is written to `tmp_path` first and renamed once complete, so an
/// interrupted transfer never leaves a truncated archive under the final name.
/// A stale `tmp_path` from an earlier run is removed first.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// - `NotFound` when the server answers 404
/// - `NetworkError` for transport failures and other non-success statuses
///   (the message starts with `HTTP <code>:` when a status was received)
/// - `IoError` when the file cannot be written or renamed
pub(crate) async fn download_to_file(
    client: &reqwest::Client,
    url: &Url,
    credentials: &Credentials,
    tmp_path: &Path,
    file_path: &Path,
    label: &str,
) -> AppResult<u64> {
    if fs::try_exists(tmp_path).await.unwrap_or(false) {
        if let Err(e) = fs::remove_file(tmp_path).await {
            warn!(
                file_path = %tmp_path.display(),
                error = %e,
                "Failed to remove stale temp file"
            );
        }
    }

    let response = client
        .get(url.as_str())
        .basic_auth(credentials.username(), Some(credentials.key()))
        .send()
        .await
        .map_err(|e| AppError::NetworkError(format!("Failed to download {label}: {e}")))?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(AppError::NotFound(format!(
            "Dataset '{label}' was not found ({url})"
        )));
    }

    let mut response = response.error_for_status().map_err(|e| {
        let status_code = status.as_u16();
        AppError::NetworkError(format!("HTTP {status_code}: Failed to download {label}: {e}"))
    })?;

    let pb = ui::create_download_bar(response.content_length())?;
    pb.set_message(format!("Downloading {label}..."));

    let mut file = File::create(tmp_path).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to create temp file {}: {}",
            tmp_path.display(),
            e
        ))
    })?;

    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await.map_err(|e| {
            AppError::IoError(format!(
                "Failed to write to temp file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;
        written += chunk.len() as u64;
        pb.inc(chunk.len() as u64);
    }

    file.flush().await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to flush temp file {}: {}",
            tmp_path.display(),
            e
        ))
    })?;
    // Ensure the file is closed before renaming
    drop(file);

    fs::rename(tmp_path, file_path).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to rename temp file {} to {}: {}",
            tmp_path.display(),
            file_path.display(),
            e
        ))
    })?;

    pb.finish_with_message(format!("Downloaded {label}"));
    debug!(file_path = %file_path.display(), bytes = written, "Archive written");

    Ok(written)
}
