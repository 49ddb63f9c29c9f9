use crate::credentials::Credentials;
use crate::errors::AppResult;
use std::path::Path;

/// A service that can fetch a dataset archive by identifier.
///
/// Credentials are passed on every call; implementations must not read them
/// from the process environment.
#[allow(async_fn_in_trait)]
pub trait DatasetProvider {
    /// Checks that `credentials` are usable before any transfer starts.
    async fn authenticate(&self, credentials: &Credentials) -> AppResult<()>;

    /// Transfers the archive for `dataset` into `path` (or the provider's
    /// default location when `None`), extracting it in place when `unzip`
    /// is set.
    async fn download(
        &self,
        credentials: &Credentials,
        dataset: &str,
        path: Option<&Path>,
        unzip: bool,
    ) -> AppResult<()>;
}
