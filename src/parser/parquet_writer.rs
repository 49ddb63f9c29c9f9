use crate::errors::{AppError, AppResult};
use crate::utils::size_mb;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use tracing::info;

/// Writes a loaded table to `path` as Parquet, creating parent directories.
///
/// Returns the size of the written file in bytes.
pub fn write_parquet(df: &mut DataFrame, path: &Path) -> AppResult<u64> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::IoError(format!(
                "Failed to create directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let mut file = File::create(path).map_err(|e| {
        AppError::IoError(format!(
            "Failed to create Parquet file {}: {e}",
            path.display()
        ))
    })?;

    ParquetWriter::new(&mut file)
        .finish(df)
        .map_err(|e| AppError::ParseError(format!("Failed to write Parquet file: {e}")))?;

    let bytes = fs::metadata(path)
        .map_err(|e| {
            AppError::IoError(format!(
                "Failed to read Parquet file metadata {}: {e}",
                path.display()
            ))
        })?
        .len();

    info!(
        file = %path.display(),
        rows = df.height(),
        output_size_mb = size_mb(bytes),
        "Parquet file written"
    );

    Ok(bytes)
}
