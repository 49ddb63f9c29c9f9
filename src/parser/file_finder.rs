use std::path::{Path, PathBuf};

/// Recursively collects files under `dir` whose extension matches `extension`
/// (case-insensitive), sorted by path.
///
/// Unreadable entries are skipped. A missing directory yields an empty list.
pub fn find_files_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(extension))
        })
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}
