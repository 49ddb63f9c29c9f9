use super::file_downloader::download_to_file;
use super::provider::DatasetProvider;
use crate::constants::{DEFAULT_DATASETS_DIR, KAGGLE_API_BASE_URL};
use crate::credentials::Credentials;
use crate::errors::{AppError, AppResult};
use crate::extractor::extract_archive;
use crate::models::split_dataset_id;
use crate::utils::{format_duration, size_mb, throughput_mb_s};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;
use tracing::{debug, info};
use url::Url;

/// Kaggle REST API client for dataset archives.
#[derive(Debug, Clone)]
pub struct KaggleClient {
    client: reqwest::Client,
    base_url: Url,
}

impl KaggleClient {
    /// Client for the public Kaggle API.
    pub fn new() -> AppResult<Self> {
        Self::with_base_url(KAGGLE_API_BASE_URL)
    }

    /// Client for a Kaggle-compatible API rooted at `base_url`
    /// (for example `https://www.kaggle.com/api/v1`).
    pub fn with_base_url(base_url: &str) -> AppResult<Self> {
        let mut base_url = Url::parse(base_url.trim())?;
        // Url::join replaces the last segment unless the base ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    /// Archive endpoint for `owner/name`.
    pub fn download_url(&self, dataset: &str) -> AppResult<Url> {
        let (owner, name) = split_dataset_id(dataset)?;
        Ok(self
            .base_url
            .join(&format!("datasets/download/{owner}/{name}"))?)
    }
}

/// Kaggle's default location for a dataset: `datasets/<owner>/<name>`
/// relative to the working directory.
pub fn default_download_dir(dataset: &str) -> AppResult<PathBuf> {
    let (owner, name) = split_dataset_id(dataset)?;
    Ok(Path::new(DEFAULT_DATASETS_DIR).join(owner).join(name))
}

impl DatasetProvider for KaggleClient {
    async fn authenticate(&self, credentials: &Credentials) -> AppResult<()> {
        // HTTP basic auth cannot carry ':' in the user part
        if credentials.username().contains(':') {
            return Err(AppError::ConfigError(format!(
                "Kaggle username '{}' must not contain ':'",
                credentials.username()
            )));
        }
        debug!(username = credentials.username(), "Kaggle credentials accepted");
        Ok(())
    }

    async fn download(
        &self,
        credentials: &Credentials,
        dataset: &str,
        path: Option<&Path>,
        unzip: bool,
    ) -> AppResult<()> {
        let url = self.download_url(dataset)?;
        let dest = match path {
            Some(p) => p.to_path_buf(),
            None => default_download_dir(dataset)?,
        };
        let (_, name) = split_dataset_id(dataset)?;

        fs::create_dir_all(&dest).await.map_err(|e| {
            AppError::IoError(format!(
                "Failed to create directory {}: {e}",
                dest.display()
            ))
        })?;

        let zip_path = dest.join(format!("{name}.zip"));
        let tmp_path = dest.join(format!("{name}.zip.part"));

        info!(dataset, dest = %dest.display(), "Starting download");
        let start = Instant::now();

        let bytes =
            download_to_file(&self.client, &url, credentials, &tmp_path, &zip_path, dataset)
                .await?;

        let elapsed = start.elapsed();
        info!(
            dataset,
            size_mb = size_mb(bytes),
            elapsed = %format_duration(elapsed),
            throughput_mb_s = throughput_mb_s(bytes, elapsed),
            "Download completed"
        );

        if unzip {
            extract_archive(&zip_path, &dest).await?;
            fs::remove_file(&zip_path).await.map_err(|e| {
                AppError::IoError(format!(
                    "Failed to remove archive {}: {e}",
                    zip_path.display()
                ))
            })?;
            debug!(zip_file = %zip_path.display(), "Removed archive after extraction");
        }

        Ok(())
    }
}
