use crate::errors::{AppError, AppResult};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::ZipArchive;

/// Extracts a ZIP archive into `dest_dir` and returns the extracted file paths.
///
/// Entries are written relative to `dest_dir` (no per-archive subdirectory),
/// overwriting files of the same name. The blocking work runs on tokio's
/// blocking pool.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened or read, or if any entry
/// cannot be written.
///
/// # Example
///
/// ```no_run
/// use kaggle_connector::extractor;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let files = extractor::extract_archive(
///     Path::new("online_retail_data/onlineretail.zip"),
///     Path::new("online_retail_data"),
/// )
/// .await?;
/// println!("extracted {} file(s)", files.len());
/// # Ok(())
/// # }
/// ```
pub async fn extract_archive(zip_path: &Path, dest_dir: &Path) -> AppResult<Vec<PathBuf>> {
    let zip_path = zip_path.to_path_buf();
    let dest_dir = dest_dir.to_path_buf();

    info!(
        zip_file = %zip_path.display(),
        extract_dir = %dest_dir.display(),
        "Extracting ZIP file"
    );

    let extracted = tokio::task::spawn_blocking(move || extract_zip_sync(&zip_path, &dest_dir))
        .await
        .map_err(|e| AppError::IoError(format!("Task join error: {e}")))??;

    info!(files = extracted.len(), "Extraction completed");
    Ok(extracted)
}

/// Synchronous extraction of a single ZIP file into `dest_dir`.
pub fn extract_zip_sync(zip_path: &Path, dest_dir: &Path) -> AppResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dest_dir).map_err(|e| {
        AppError::IoError(format!(
            "Failed to create extraction directory {}: {}",
            dest_dir.display(),
            e
        ))
    })?;

    let file = File::open(zip_path).map_err(|e| {
        AppError::IoError(format!(
            "Failed to open ZIP file {}: {}",
            zip_path.display(),
            e
        ))
    })?;

    let mut archive = ZipArchive::new(file).map_err(|e| {
        AppError::ParseError(format!(
            "Failed to read ZIP archive {}: {}",
            zip_path.display(),
            e
        ))
    })?;

    let mut extracted = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| {
            AppError::ParseError(format!(
                "Failed to read file {} from ZIP {}: {}",
                i,
                zip_path.display(),
                e
            ))
        })?;

        // Entries escaping the destination (absolute paths, `..`) are dropped
        let out_path = match entry.enclosed_name() {
            Some(path) => dest_dir.join(path),
            None => {
                debug!(entry = entry.name(), "Skipping unsafe ZIP entry name");
                continue;
            }
        };

        if entry.is_dir() {
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::IoError(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut out_file = File::create(&out_path).map_err(|e| {
            AppError::IoError(format!(
                "Failed to create file {}: {}",
                out_path.display(),
                e
            ))
        })?;

        std::io::copy(&mut entry, &mut out_file).map_err(|e| {
            AppError::IoError(format!(
                "Failed to copy file from ZIP {} to {}: {}",
                zip_path.display(),
                out_path.display(),
                e
            ))
        })?;

        extracted.push(out_path);
    }

    Ok(extracted)
}
