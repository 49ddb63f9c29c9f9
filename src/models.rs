use crate::config::ResolvedConfig;
use crate::constants::*;
use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::borrow::Cow;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

/// Cached regex for `owner/name` dataset identifiers.
static DATASET_ID_REGEX: OnceLock<Regex> = OnceLock::new();

/// Named dataset with a fixed Kaggle identifier and packaged file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    OnlineRetail,
    NbaPlayers,
}

impl DatasetKind {
    /// Returns a human-readable name for the dataset.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OnlineRetail => "Online Retail",
            Self::NbaPlayers => "NBA Players",
        }
    }

    /// Kaggle identifier used when the caller does not supply one.
    pub fn default_dataset(&self) -> &'static str {
        match self {
            Self::OnlineRetail => ONLINE_RETAIL_DATASET,
            Self::NbaPlayers => NBA_PLAYERS_DATASET,
        }
    }

    /// Returns the directory the archive is downloaded and extracted into.
    pub fn download_dir(&self, config: &ResolvedConfig) -> PathBuf {
        match self {
            Self::OnlineRetail => config.online_retail_dir.clone(),
            Self::NbaPlayers => config.nba_players_dir.clone(),
        }
    }

    /// File expected inside the extracted archive.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::OnlineRetail => ONLINE_RETAIL_FILE,
            Self::NbaPlayers => NBA_PLAYERS_FILE,
        }
    }

    /// Both source files carry bytes that are not valid UTF-8.
    pub fn encoding(&self) -> TextEncoding {
        match self {
            Self::OnlineRetail | Self::NbaPlayers => TextEncoding::Latin1,
        }
    }
}

impl FromStr for DatasetKind {
    type Err = AppError;

    fn from_str(value: &str) -> AppResult<Self> {
        let lower = value.trim().to_lowercase();

        if ONLINE_RETAIL_ALIASES.contains(&lower.as_str()) {
            Ok(Self::OnlineRetail)
        } else if NBA_PLAYERS_ALIASES.contains(&lower.as_str()) {
            Ok(Self::NbaPlayers)
        } else {
            Err(AppError::InvalidInput(format!(
                "Unknown dataset '{value}'. Expected one of: {}, {}",
                ONLINE_RETAIL_ALIASES.join(", "),
                NBA_PLAYERS_ALIASES.join(", ")
            )))
        }
    }
}

/// Text encoding of a delimited file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// ISO-8859-1: every byte is the code point of the same value.
    Latin1,
}

impl TextEncoding {
    /// Decodes raw file bytes into UTF-8 text.
    ///
    /// `Latin1` never fails. `Utf8` borrows the input when it is valid and
    /// returns a `ParseError` otherwise.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> AppResult<Cow<'a, str>> {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|e| AppError::ParseError(format!("Invalid UTF-8 input: {e}"))),
            Self::Latin1 => {
                if bytes.is_ascii() {
                    // ASCII is identical in both encodings
                    return Ok(Cow::Borrowed(
                        std::str::from_utf8(bytes).unwrap_or_default(),
                    ));
                }
                Ok(Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()))
            }
        }
    }
}

/// Splits a Kaggle dataset identifier into `(owner, name)`.
///
/// # Errors
///
/// Returns `InvalidInput` unless the identifier has exactly the form
/// `owner/name` with URL-safe segments.
///
/// # Example
///
/// ```
/// use kaggle_connector::models::split_dataset_id;
///
/// # fn main() -> Result<(), kaggle_connector::errors::AppError> {
/// let (owner, name) = split_dataset_id("vijayuv/onlineretail")?;
/// assert_eq!(owner, "vijayuv");
/// assert_eq!(name, "onlineretail");
/// # Ok(())
/// # }
/// ```
pub fn split_dataset_id(dataset: &str) -> AppResult<(&str, &str)> {
    let regex = DATASET_ID_REGEX.get_or_init(|| {
        Regex::new(DATASET_ID_PATTERN).expect("DATASET_ID_PATTERN is a valid regex pattern")
    });

    if !regex.is_match(dataset) {
        return Err(AppError::InvalidInput(format!(
            "Dataset identifier must look like 'owner/name', got '{dataset}'"
        )));
    }

    dataset
        .split_once('/')
        .ok_or_else(|| AppError::InvalidInput(format!("Missing '/' in dataset '{dataset}'")))
}
