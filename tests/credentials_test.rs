//! Integration tests for loader construction from a secrets file.
//!
//! Only `construction_touches_environment_only_on_export` reads or writes
//! `KAGGLE_USERNAME` / `KAGGLE_KEY`, so tests in this binary cannot race on them.

#[path = "common/mod.rs"]
mod common;

use common::*;
use kaggle_connector::errors::{AppError, ErrorKind};
use kaggle_connector::KaggleConnector;
use tempfile::TempDir;

#[test]
fn test_construction_reads_both_secrets() {
    let temp_dir = TempDir::new().unwrap();
    let env_path = write_env_file(
        temp_dir.path(),
        "# Kaggle\nkaggle_username=file_user\nkaggle_key=file_key_123\n",
    );

    let connector = KaggleConnector::new(Some(env_path.as_path())).unwrap();

    assert_eq!(connector.credentials().username(), "file_user");
    assert_eq!(connector.credentials().key(), "file_key_123");
}

#[test]
fn test_missing_key_fails_with_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let env_path = write_env_file(temp_dir.path(), "kaggle_username=file_user\n");

    for _ in 0..2 {
        let err = KaggleConnector::new(Some(env_path.as_path())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}

#[test]
fn test_empty_username_fails_with_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let env_path = write_env_file(temp_dir.path(), "kaggle_username=\nkaggle_key=abc\n");

    assert!(matches!(
        KaggleConnector::new(Some(env_path.as_path())),
        Err(AppError::ConfigError(_))
    ));
}

#[test]
fn test_missing_secrets_file_fails_with_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let env_path = temp_dir.path().join("absent.env");

    assert!(matches!(
        KaggleConnector::new(Some(env_path.as_path())),
        Err(AppError::ConfigError(_))
    ));
}

#[test]
fn construction_touches_environment_only_on_export() {
    let temp_dir = TempDir::new().unwrap();
    let before_user = std::env::var("KAGGLE_USERNAME").ok();
    let before_key = std::env::var("KAGGLE_KEY").ok();

    // A failed construction leaves the environment alone
    let bad = write_env_file(temp_dir.path(), "kaggle_username=export_user\n");
    assert!(KaggleConnector::new(Some(bad.as_path())).is_err());
    assert_eq!(std::env::var("KAGGLE_USERNAME").ok(), before_user);
    assert_eq!(std::env::var("KAGGLE_KEY").ok(), before_key);

    // So does a successful one, until the caller exports
    let good = write_env_file(
        temp_dir.path(),
        "kaggle_username=export_user\nkaggle_key=export_key\n",
    );
    let connector = KaggleConnector::new(Some(good.as_path())).unwrap();
    assert_eq!(std::env::var("KAGGLE_USERNAME").ok(), before_user);

    connector.export_credentials();
    assert_eq!(std::env::var("KAGGLE_USERNAME").unwrap(), "export_user");
    assert_eq!(std::env::var("KAGGLE_KEY").unwrap(), "export_key");
}
