//! Kaggle credentials loaded from a `.env` secrets file.
//!
//! The secrets file is read without touching the process environment. Values
//! already present in the process environment win over the file, which is the
//! usual dotenv "no override" rule. Exporting to `KAGGLE_USERNAME` /
//! `KAGGLE_KEY` is a separate, explicit step ([`Credentials::export_to_env`]).

use crate::constants::{
    DEFAULT_ENV_FILE, KAGGLE_KEY_VAR, KAGGLE_USERNAME_VAR, KEY_SECRET, USERNAME_SECRET,
};
use crate::errors::{AppError, AppResult};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Kaggle username and API key. Both are guaranteed non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    key: String,
}

impl Credentials {
    /// Builds credentials from explicit values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either value is empty.
    pub fn new(username: impl Into<String>, key: impl Into<String>) -> AppResult<Self> {
        let username = username.into();
        let key = key.into();
        if username.is_empty() || key.is_empty() {
            return Err(missing_credentials());
        }
        Ok(Self { username, key })
    }

    /// Loads credentials from a secrets file, letting the process environment
    /// take precedence for the same keys.
    ///
    /// A secrets file that does not exist is treated as empty, so credentials
    /// may still come entirely from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be parsed or if
    /// `kaggle_username` / `kaggle_key` end up missing or empty.
    pub fn from_env_file(path: &Path) -> AppResult<Self> {
        let file_vars = read_env_file(path)?;
        Self::resolve(&file_vars, |name| std::env::var(name).ok())
    }

    /// Picks each secret from `process_env` first, then from `file_vars`.
    pub(crate) fn resolve<F>(file_vars: &HashMap<String, String>, process_env: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| process_env(name).or_else(|| file_vars.get(name).cloned());

        match (lookup(USERNAME_SECRET), lookup(KEY_SECRET)) {
            (Some(username), Some(key)) => Self::new(username, key),
            _ => Err(missing_credentials()),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Sets `KAGGLE_USERNAME` and `KAGGLE_KEY` for tools that read them.
    ///
    /// This writes process-global state that is never reset. Concurrent
    /// writers (other threads, other loaders) are not synchronized.
    pub fn export_to_env(&self) {
        std::env::set_var(KAGGLE_USERNAME_VAR, &self.username);
        std::env::set_var(KAGGLE_KEY_VAR, &self.key);
        info!(
            username = %self.username,
            "Exported Kaggle credentials to process environment"
        );
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("key", &"<redacted>")
            .finish()
    }
}

fn missing_credentials() -> AppError {
    AppError::ConfigError(format!(
        "Kaggle credentials not found: both '{USERNAME_SECRET}' and '{KEY_SECRET}' must be set and non-empty"
    ))
}

/// Default secrets file: `.env` in the crate root directory.
pub fn default_env_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_ENV_FILE)
}

/// Reads `KEY=VALUE` pairs from a dotenv-style file.
///
/// Comment lines, `export` prefixes and quoting follow `dotenvy`. A missing
/// file yields an empty map.
pub fn read_env_file(path: &Path) -> AppResult<HashMap<String, String>> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            debug!(env_file = %path.display(), "Secrets file not found, using process environment only");
            return Ok(HashMap::new());
        }
        Err(e) => {
            return Err(AppError::ConfigError(format!(
                "Failed to open secrets file {}: {e}",
                path.display()
            )))
        }
    };

    let mut vars = HashMap::new();
    for item in iter {
        let (name, value) = item.map_err(|e| {
            AppError::ConfigError(format!(
                "Failed to parse secrets file {}: {e}",
                path.display()
            ))
        })?;
        vars.insert(name, value);
    }

    debug!(env_file = %path.display(), keys = vars.len(), "Secrets file loaded");
    Ok(vars)
}
