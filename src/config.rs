use crate::constants::{KAGGLE_API_BASE_URL, NBA_PLAYERS_DIR, ONLINE_RETAIL_DIR};
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved configuration with all values filled in.
///
/// This struct represents the loader defaults and can be deserialized by the TOML
/// loader. Only `env_path` is optional; `None` means the `.env` next to the crate root.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// Secrets file holding `kaggle_username` and `kaggle_key`
    pub env_path: Option<PathBuf>,
    /// Base URL of the Kaggle REST API
    pub api_base_url: String,
    /// Download and extraction directory for the Online Retail dataset
    pub online_retail_dir: PathBuf,
    /// Download and extraction directory for the NBA players dataset
    pub nba_players_dir: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            env_path: None,
            api_base_url: KAGGLE_API_BASE_URL.to_string(),
            online_retail_dir: PathBuf::from(ONLINE_RETAIL_DIR),
            nba_players_dir: PathBuf::from(NBA_PLAYERS_DIR),
        }
    }
}

/// Configuration for a single load run, read from a TOML file.
///
/// `dataset` is required; everything else falls back to [`ResolvedConfig`]
/// defaults. Unknown keys are rejected to catch typos.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolvedConfigFile {
    /// Dataset kind: `"online-retail"`, `"retail"`, `"or"`, `"nba-players"`, `"nba"` or `"players"`
    pub dataset: String,
    /// Local CSV to parse instead of downloading
    pub file: Option<PathBuf>,
    /// Kaggle identifier overriding the dataset's default
    pub dataset_id: Option<String>,
    /// Where to write the loaded table as Parquet
    pub save_parquet: Option<PathBuf>,
    /// Flattened resolved configuration with loader defaults
    #[serde(flatten)]
    pub resolved: ResolvedConfig,
}

impl ResolvedConfigFile {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the TOML is malformed, `dataset` is missing,
    /// unknown keys are present, or `api_base_url` is empty.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ResolvedConfigFile = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;

        if config.resolved.api_base_url.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "api_base_url must not be empty".into(),
            ));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_values() {
        let config = ResolvedConfig::default();
        assert!(config.env_path.is_none());
        assert_eq!(config.api_base_url, "https://www.kaggle.com/api/v1");
        assert_eq!(config.online_retail_dir, PathBuf::from("online_retail_data"));
        assert_eq!(config.nba_players_dir, PathBuf::from("nba-players-database"));
    }

    #[test]
    fn minimal_toml_is_parsed_and_defaults_apply() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"
            dataset = "nba"
            "#,
        )
        .unwrap();

        let config = ResolvedConfigFile::from_toml_file(tmp.path()).unwrap();
        assert_eq!(config.dataset, "nba");
        assert!(config.file.is_none());
        assert!(config.dataset_id.is_none());
        assert_eq!(config.resolved.api_base_url, "https://www.kaggle.com/api/v1");
    }

    #[test]
    fn overrides_are_applied() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"
            dataset = "online-retail"
            dataset_id = "someone/retail-mirror"
            env_path = "secrets/.env"
            online_retail_dir = "data/retail"
            "#,
        )
        .unwrap();

        let config = ResolvedConfigFile::from_toml_file(tmp.path()).unwrap();
        assert_eq!(config.dataset_id.as_deref(), Some("someone/retail-mirror"));
        assert_eq!(
            config.resolved.env_path,
            Some(PathBuf::from("secrets/.env"))
        );
        assert_eq!(config.resolved.online_retail_dir, PathBuf::from("data/retail"));
    }

    #[test]
    fn missing_required_toml_field_errors() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, r#"file = "retail.csv""#).unwrap();

        assert!(ResolvedConfigFile::from_toml_file(tmp.path()).is_err());
    }

    #[test]
    fn unknown_key_errors() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"
            dataset = "nba"
            extra_flag = true
            "#,
        )
        .unwrap();

        assert!(ResolvedConfigFile::from_toml_file(tmp.path()).is_err());
    }

    #[test]
    fn empty_base_url_errors() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"
            dataset = "nba"
            api_base_url = ""
            "#,
        )
        .unwrap();

        let err = ResolvedConfigFile::from_toml_file(tmp.path()).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
