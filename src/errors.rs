use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Required secret missing or empty, or a malformed secrets/config file
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Remote dataset or expected local file does not exist
    #[error("Not found: {0}")]
    NotFound(String),
    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Failed to parse CSV or archive content
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    UrlError(String),
    /// Invalid input format
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(String),
}

/// Coarse grouping of [`AppError`] variants for callers that only care
/// whether a failure is their fault, a missing resource, or something
/// outside this crate's control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    NotFound,
    External,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::ConfigError(_) => ErrorKind::Configuration,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::NetworkError(_)
            | AppError::ParseError(_)
            | AppError::UrlError(_)
            | AppError::InvalidInput(_)
            | AppError::IoError(_) => ErrorKind::External,
        }
    }
}

// Conversion implementations for common errors
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::NetworkError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::UrlError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound(err.to_string())
        } else {
            AppError::IoError(err.to_string())
        }
    }
}

impl From<polars::prelude::PolarsError> for AppError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<zip::result::ZipError> for AppError {
    fn from(err: zip::result::ZipError) -> Self {
        AppError::ParseError(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
