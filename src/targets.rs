use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

/// Lists the files in `base_dir` matching `pattern`, sorted by path.
///
/// Only the base directory itself is searched: `*.podspec` does not descend
/// into subdirectories. Directories matching the pattern are skipped.
pub fn find_targets(base_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let base = base_dir.to_str().ok_or_else(|| {
        ReleaseError::config(format!(
            "base directory is not valid UTF-8: {}",
            base_dir.display()
        ))
    })?;

    let full_pattern = format!(
        "{}/{}",
        glob::Pattern::escape(base.trim_end_matches('/')),
        pattern
    );

    let entries = glob::glob(&full_pattern)
        .map_err(|e| ReleaseError::config(format!("invalid target pattern '{}': {}", pattern, e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            ReleaseError::file("list", path, e.into())
        })?;
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    log::debug!("pattern '{}' matched {} file(s)", pattern, files.len());
    Ok(files)
}
