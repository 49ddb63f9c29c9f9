//! Credentialed dataset loader.
//!
//! [`KaggleConnector`] owns a validated [`Credentials`] pair and a
//! [`DatasetProvider`]. It downloads dataset archives and parses a known CSV
//! file inside them into a Polars [`DataFrame`]. Nothing is cached: every load
//! without an explicit file downloads and parses again.

use crate::config::ResolvedConfig;
use crate::credentials::{default_env_path, Credentials};
use crate::downloader::{DatasetProvider, KaggleClient};
use crate::errors::{AppError, AppResult};
use crate::models::DatasetKind;
use crate::parser::{find_files_with_extension, read_csv};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loader for Kaggle datasets, generic over the provider client.
#[derive(Debug)]
pub struct KaggleConnector<P = KaggleClient> {
    credentials: Credentials,
    provider: P,
    config: ResolvedConfig,
}

impl KaggleConnector<KaggleClient> {
    /// Loads credentials from `env_path` (or the `.env` in the crate root)
    /// and builds a loader backed by the public Kaggle API.
    ///
    /// Nothing is downloaded and the process environment is not modified.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `kaggle_username` or `kaggle_key` is missing
    /// or empty, or when the secrets file cannot be parsed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use kaggle_connector::KaggleConnector;
    ///
    /// # async fn example() -> Result<(), kaggle_connector::errors::AppError> {
    /// let connector = KaggleConnector::new(None)?;
    /// let df = connector.load_online_retail(None, None).await?;
    /// println!("{}", df.head(Some(5)));
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(env_path: Option<&Path>) -> AppResult<Self> {
        let config = ResolvedConfig {
            env_path: env_path.map(Path::to_path_buf),
            ..ResolvedConfig::default()
        };
        Self::from_config(&config)
    }

    /// Builds a Kaggle-backed loader from a resolved configuration.
    pub fn from_config(config: &ResolvedConfig) -> AppResult<Self> {
        let env_path = config.env_path.clone().unwrap_or_else(default_env_path);
        let credentials = Credentials::from_env_file(&env_path)?;
        let provider = KaggleClient::with_base_url(&config.api_base_url)?;
        info!(
            env_file = %env_path.display(),
            username = credentials.username(),
            "Kaggle credentials loaded"
        );
        Ok(Self::with_provider(credentials, provider).with_config(config.clone()))
    }
}

impl<P: DatasetProvider> KaggleConnector<P> {
    /// Builds a loader around any provider with already validated credentials.
    pub fn with_provider(credentials: Credentials, provider: P) -> Self {
        Self {
            credentials,
            provider,
            config: ResolvedConfig::default(),
        }
    }

    /// Replaces the directory defaults used by [`Self::load_dataset`].
    pub fn with_config(mut self, config: ResolvedConfig) -> Self {
        self.config = config;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Sets `KAGGLE_USERNAME` and `KAGGLE_KEY` for external Kaggle tooling.
    /// See [`Credentials::export_to_env`] for the caveats.
    pub fn export_credentials(&self) {
        self.credentials.export_to_env();
    }

    /// Downloads `dataset` into `path`, extracting it when `unzip` is set.
    ///
    /// Returns `path` exactly as given (`None` stays `None`, in which case the
    /// provider picked its own default location). Provider errors are
    /// returned unchanged.
    pub async fn download_dataset(
        &self,
        dataset: &str,
        path: Option<&Path>,
        unzip: bool,
    ) -> AppResult<Option<PathBuf>> {
        self.provider.authenticate(&self.credentials).await?;
        self.provider
            .download(&self.credentials, dataset, path, unzip)
            .await?;
        Ok(path.map(Path::to_path_buf))
    }

    /// Loads one of the named datasets.
    ///
    /// With `file_path`, that file is parsed directly and no download happens.
    /// Without it, `dataset` (or the kind's default identifier) is downloaded
    /// and extracted into the kind's directory, and the kind's expected file
    /// is parsed from there.
    ///
    /// # Errors
    ///
    /// - Provider errors from the download, unchanged
    /// - `NotFound` when the expected file is absent after extraction; the
    ///   message lists the CSV files that were extracted instead
    /// - `ParseError` when the file is not valid CSV
    pub async fn load_dataset(
        &self,
        kind: DatasetKind,
        file_path: Option<&Path>,
        dataset: Option<&str>,
    ) -> AppResult<DataFrame> {
        let file_path = match file_path {
            Some(path) => {
                debug!(file = %path.display(), "Using local file, skipping download");
                path.to_path_buf()
            }
            None => {
                let dataset = dataset.unwrap_or(kind.default_dataset());
                let download_dir = kind.download_dir(&self.config);
                info!(
                    dataset_kind = kind.display_name(),
                    dataset,
                    dest = %download_dir.display(),
                    "Fetching dataset"
                );
                self.download_dataset(dataset, Some(download_dir.as_path()), true)
                    .await?;
                let expected = download_dir.join(kind.file_name());
                ensure_extracted(&expected, &download_dir)?;
                expected
            }
        };

        read_csv(&file_path, kind.encoding())
    }

    /// Loads the Online Retail dataset (`vijayuv/onlineretail` by default).
    pub async fn load_online_retail(
        &self,
        file_path: Option<&Path>,
        dataset: Option<&str>,
    ) -> AppResult<DataFrame> {
        self.load_dataset(DatasetKind::OnlineRetail, file_path, dataset)
            .await
    }

    /// Loads the NBA players dataset (`yagizfiratt/nba-players-database` by default).
    pub async fn load_nba_players_dataset(
        &self,
        file_path: Option<&Path>,
        dataset: Option<&str>,
    ) -> AppResult<DataFrame> {
        self.load_dataset(DatasetKind::NbaPlayers, file_path, dataset)
            .await
    }
}

/// Fails with a descriptive `NotFound` when the archive did not contain the
/// expected file (for example after the publisher renamed it).
fn ensure_extracted(expected: &Path, download_dir: &Path) -> AppResult<()> {
    if expected.is_file() {
        return Ok(());
    }

    let found: Vec<String> = find_files_with_extension(download_dir, "csv")
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    let found = if found.is_empty() {
        "none".to_string()
    } else {
        found.join(", ")
    };

    Err(AppError::NotFound(format!(
        "Expected file {} after extraction; CSV files found: {found}",
        expected.display()
    )))
}
