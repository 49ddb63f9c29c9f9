use crate::errors::{AppError, AppResult};
use indicatif::{ProgressBar, ProgressStyle};

/// Creates a progress bar for a file transfer.
///
/// When the server announces a length the bar tracks bytes against it;
/// otherwise a spinner shows the bytes received so far.
///
/// # Example
///
/// ```no_run
/// use kaggle_connector::ui;
///
/// # fn main() -> Result<(), kaggle_connector::errors::AppError> {
/// let pb = ui::create_download_bar(Some(1024))?;
/// pb.inc(512);
/// pb.finish_with_message("Done");
/// # Ok(())
/// # }
/// ```
pub fn create_download_bar(total_bytes: Option<u64>) -> AppResult<ProgressBar> {
    let (pb, template) = match total_bytes {
        Some(total) => (
            ProgressBar::new(total),
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} {msg}",
        ),
        None => (
            ProgressBar::new_spinner(),
            "{spinner:.green} [{elapsed_precise}] {bytes} {msg}",
        ),
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .map_err(|e| AppError::IoError(format!("Failed to create progress bar template: {e}")))?
            .progress_chars("#>-"),
    );
    Ok(pb)
}
