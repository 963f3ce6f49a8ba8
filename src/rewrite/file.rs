use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};
use crate::rewrite::{rewrite_text, split_lines, RewriteRule};

/// What a rewrite pass did (or would do) to one file
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Number of lines in the file, unchanged by the rewrite
    pub lines: usize,
    /// Lines on which at least one rule matched
    pub matched_lines: usize,
    /// Whether the rewritten bytes differ from the original
    pub changed: bool,
}

/// Staging path the rewritten copy is written to before it replaces `path`.
pub fn sibling_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push("-new");
    PathBuf::from(name)
}

/// Computes the rewrite of `path` without touching the filesystem.
pub fn plan_file(path: &Path, rules: &[RewriteRule]) -> Result<FileOutcome> {
    compute(path, rules).map(|(_, outcome)| outcome)
}

/// Rewrites `path` in place through [replace_atomically].
///
/// Files without a single match are still written back, byte-identical.
pub fn rewrite_file(path: &Path, rules: &[RewriteRule]) -> Result<FileOutcome> {
    let (content, outcome) = compute(path, rules)?;
    replace_atomically(path, &content)?;
    log::debug!(
        "rewrote {} ({} of {} lines matched)",
        path.display(),
        outcome.matched_lines,
        outcome.lines
    );
    Ok(outcome)
}

/// Writes `content` to the `-new` sibling of `path`, then renames it over `path`.
///
/// The rename is a single replace operation, so `path` holds either the old or
/// the new content at every point. If the sibling cannot be fully written it is
/// removed again and `path` is left untouched.
pub fn replace_atomically(path: &Path, content: &[u8]) -> Result<()> {
    let staging = sibling_path(path);

    if let Err(e) = write_staging(&staging, content, path) {
        if staging.is_file() {
            let _ = fs::remove_file(&staging);
        }
        return Err(e);
    }

    fs::rename(&staging, path).map_err(|e| ReleaseError::file("replace", path, e))
}

fn compute(path: &Path, rules: &[RewriteRule]) -> Result<(Vec<u8>, FileOutcome)> {
    let original = fs::read(path).map_err(|e| ReleaseError::file("read", path, e))?;
    let rewritten = rewrite_text(&original, rules);

    let matched_lines = split_lines(&original)
        .filter(|(body, _)| rules.iter().any(|rule| rule.is_match(body)))
        .count();

    let outcome = FileOutcome {
        path: path.to_path_buf(),
        lines: split_lines(&original).count(),
        matched_lines,
        changed: rewritten != original,
    };

    Ok((rewritten, outcome))
}

fn write_staging(staging: &Path, content: &[u8], original: &Path) -> Result<()> {
    let mut file = File::create(staging).map_err(|e| ReleaseError::file("write", staging, e))?;
    file.write_all(content)
        .map_err(|e| ReleaseError::file("write", staging, e))?;
    file.sync_all()
        .map_err(|e| ReleaseError::file("write", staging, e))?;

    // keep the original's mode bits (e.g. an executable script)
    if let Ok(metadata) = fs::metadata(original) {
        fs::set_permissions(staging, metadata.permissions())
            .map_err(|e| ReleaseError::file("write", staging, e))?;
    }

    Ok(())
}
