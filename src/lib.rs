//! kaggle-connector library
//!
//! Loads Kaggle credentials from a `.env` secrets file and fetches datasets
//! into Polars DataFrames. The `kaggle-connector` binary is a thin CLI over it.
//!
//! ## Overview
//!
//! - [`credentials`] - Reads and validates `kaggle_username` / `kaggle_key`
//! - [`downloader`] - Provider trait and the Kaggle REST client
//! - [`extractor`] - Extracts downloaded ZIP archives in place
//! - [`parser`] - Decodes and parses CSV files, writes Parquet
//! - [`loader`] - [`KaggleConnector`], which ties the above together
//! - [`models`] - Dataset kinds, text encodings and identifier helpers
//! - [`config`] - TOML configuration
//! - [`errors`] - Error types used throughout the crate
//!
//! ## Example Usage
//!
//! ```no_run
//! use kaggle_connector::{errors::AppResult, KaggleConnector};
//! use std::path::Path;
//!
//! # async fn example() -> AppResult<()> {
//! let connector = KaggleConnector::new(Some(Path::new(".env")))?;
//!
//! // Downloads vijayuv/onlineretail into online_retail_data/ and parses OnlineRetail.csv
//! let retail = connector.load_online_retail(None, None).await?;
//!
//! // Parses an existing file without touching the network
//! let players = connector
//!     .load_nba_players_dataset(Some(Path::new("PlayerIndex_nba_stats.csv")), None)
//!     .await?;
//! println!("{} / {}", retail.height(), players.height());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod downloader;
pub mod errors;
pub mod extractor;
pub mod loader;
pub mod models;
pub mod parser;
pub mod ui;
pub mod utils;

pub use credentials::Credentials;
pub use loader::KaggleConnector;
