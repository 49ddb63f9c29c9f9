//! Dataset download through a provider client.
//!
//! [`DatasetProvider`] is the seam between the loader and the service that
//! hosts datasets. [`KaggleClient`] is the Kaggle REST implementation.

mod file_downloader;
mod kaggle_client;
mod provider;

// Re-export public API
pub use kaggle_client::{default_download_dir, KaggleClient};
pub use provider::DatasetProvider;
