//! Release workflow orchestration
//!
//! Keeps the pipeline apart from argument parsing so it can be driven with
//! any [Repository] implementation and an explicit base directory.

use std::path::{Path, PathBuf};

use crate::boundary::ReleaseWarning;
use crate::config::{Config, TargetConfig};
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use crate::rewrite::{plan_file, release_rules, rewrite_file, FileOutcome, RewriteRule};
use crate::targets::find_targets;
use crate::version::{version_from_describe, VersionString};

/// Where the release version comes from
#[derive(Debug, Clone, PartialEq)]
pub enum VersionSource {
    /// Given on the command line
    Explicit(VersionString),
    /// Derived from `git describe --long`
    FromTags,
}

/// Arguments for the release workflow
///
/// Decoupled from the CLI so the workflow can run without clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseArgs {
    /// Absolute directory holding the target files
    pub base_dir: PathBuf,

    pub version: VersionSource,

    /// Calendar year written into copyright lines
    pub year: i32,

    /// Report what would change without writing files or touching git
    pub dry_run: bool,
}

/// Which rule set a pass applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    Version,
    Links,
}

/// One rewrite cycle over the files of a target class
#[derive(Debug, Clone, PartialEq)]
pub struct PassReport {
    pub pattern: String,
    pub kind: PassKind,
    pub files: Vec<FileOutcome>,
}

/// Result of a release run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseReport {
    pub version: VersionString,
    pub passes: Vec<PassReport>,
    pub commit_message: String,
    pub tag_name: String,
    /// Id of the release commit, `None` on a dry run
    pub commit_id: Option<String>,
    pub tagged: bool,
    pub dry_run: bool,
    pub warnings: Vec<ReleaseWarning>,
}

impl ReleaseReport {
    /// Distinct files whose content changed (or would change), in pass order
    pub fn changed_files(&self) -> Vec<&Path> {
        let mut changed: Vec<&Path> = Vec::new();
        for outcome in self.passes.iter().flat_map(|pass| &pass.files) {
            if outcome.changed && !changed.contains(&outcome.path.as_path()) {
                changed.push(&outcome.path);
            }
        }
        changed
    }
}

/// Maps the positional arguments to a version source.
///
/// Exactly one positional version is required, or none with `from_tags`.
/// `None` means the invocation is a usage error.
pub fn select_version_source(positional: &[String], from_tags: bool) -> Option<VersionSource> {
    match (positional, from_tags) {
        ([version], false) => Some(VersionSource::Explicit(VersionString::new(version.clone()))),
        ([], true) => Some(VersionSource::FromTags),
        _ => None,
    }
}

/// Resolves the directory the release works in.
///
/// An explicit directory wins. Otherwise it is the parent of the directory
/// holding `executable` (a tool kept in `buildscripts/` works on the project root).
pub fn resolve_base_dir(explicit: Option<&Path>, executable: &Path) -> Result<PathBuf> {
    let dir = match explicit {
        Some(dir) => dir.to_path_buf(),
        None => executable
            .parent()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                ReleaseError::config(format!(
                    "cannot derive a base directory from {}",
                    executable.display()
                ))
            })?,
    };

    dir.canonicalize()
        .map_err(|e| ReleaseError::file("resolve", &dir, e))
}

/// Resolves the version a release bumps to.
pub fn resolve_version<R: Repository + ?Sized>(
    source: &VersionSource,
    repo: &R,
) -> Result<VersionString> {
    match source {
        VersionSource::Explicit(version) => Ok(version.clone()),
        VersionSource::FromTags => {
            let describe = repo.describe_long()?;
            let version = version_from_describe(&describe)?;
            log::info!("derived version {} from '{}'", version, describe.trim());
            Ok(version.into())
        }
    }
}

/// Main release workflow
///
/// 1. Resolve the version
/// 2. For every target class: rewrite version tokens and copyright years,
///    then (if configured) rewrite repository links in the same files
/// 3. Commit all modified tracked files
/// 4. Create the annotated release tag
///
/// Every error aborts the run where it happens. Files rewritten before the
/// failure stay rewritten.
pub fn run_release<R: Repository + ?Sized>(
    args: &ReleaseArgs,
    config: &Config,
    repo: &R,
) -> Result<ReleaseReport> {
    let version = resolve_version(&args.version, repo)?;
    let mut passes = Vec::new();
    let mut warnings = Vec::new();

    for target in &config.targets {
        let files = find_targets(&args.base_dir, &target.pattern)?;
        if files.is_empty() {
            warnings.push(ReleaseWarning::NoMatchingFiles {
                pattern: target.pattern.clone(),
            });
            continue;
        }

        let rules = release_rules(
            &target.version_prefix,
            version.as_str(),
            &config.copyright_holder,
            args.year,
        )?;
        let outcomes = apply_pass(&files, &rules, args.dry_run, &version)?;
        warnings.extend(
            outcomes
                .iter()
                .filter(|outcome| outcome.matched_lines == 0)
                .map(|outcome| ReleaseWarning::NoVersionToken {
                    path: outcome.path.clone(),
                    prefix: target.version_prefix.clone(),
                }),
        );
        passes.push(pass_report(target, PassKind::Version, outcomes));

        if target.rewrite_links {
            let link_rules = vec![RewriteRule::repository_link(&config.links.public_base)?];
            let outcomes = apply_pass(&files, &link_rules, args.dry_run, &version)?;
            passes.push(pass_report(target, PassKind::Links, outcomes));
        }
    }

    let commit_message = config.git.commit_message_for(version.as_str());
    let tag_name = config.git.tag_name_for(version.as_str());

    let (commit_id, tagged) = if args.dry_run {
        (None, false)
    } else {
        let commit_id = repo.commit_all(&commit_message)?;
        repo.create_annotated_tag(&tag_name, &config.git.tag_message)?;
        (Some(commit_id), true)
    };

    Ok(ReleaseReport {
        version,
        passes,
        commit_message,
        tag_name,
        commit_id,
        tagged,
        dry_run: args.dry_run,
        warnings,
    })
}

fn apply_pass(
    files: &[PathBuf],
    rules: &[RewriteRule],
    dry_run: bool,
    version: &VersionString,
) -> Result<Vec<FileOutcome>> {
    files
        .iter()
        .map(|file| {
            if dry_run {
                plan_file(file, rules)
            } else {
                log::info!("updating {} to {}", file.display(), version);
                rewrite_file(file, rules)
            }
        })
        .collect()
}

fn pass_report(target: &TargetConfig, kind: PassKind, files: Vec<FileOutcome>) -> PassReport {
    PassReport {
        pattern: target.pattern.clone(),
        kind,
        files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_version_argument() {
        assert_eq!(
            select_version_source(&strings(&["1.4.0"]), false),
            Some(VersionSource::Explicit(VersionString::new("1.4.0")))
        );
    }

    #[test]
    fn test_wrong_arity_is_usage() {
        assert_eq!(select_version_source(&[], false), None);
        assert_eq!(
            select_version_source(&strings(&["1.4.0", "extra"]), false),
            None
        );
        assert_eq!(select_version_source(&strings(&["1.4.0"]), true), None);
    }

    #[test]
    fn test_from_tags_takes_no_argument() {
        assert_eq!(
            select_version_source(&[], true),
            Some(VersionSource::FromTags)
        );
    }

    #[test]
    fn test_base_dir_is_parent_of_executable_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let scripts = dir.path().join("buildscripts");
        std::fs::create_dir(&scripts).unwrap();

        let base = resolve_base_dir(None, &scripts.join("release-bump")).unwrap();

        assert_eq!(base, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_explicit_base_dir_wins() {
        let dir = tempfile::TempDir::new().unwrap();
        let base = resolve_base_dir(Some(dir.path()), Path::new("/opt/bin/release-bump")).unwrap();
        assert_eq!(base, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_missing_base_dir_fails() {
        let err = resolve_base_dir(Some(Path::new("/definitely/not/here")), Path::new("x"))
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to resolve"));
    }

    #[test]
    fn test_resolve_version_from_tags() {
        let repo = MockRepository::new().with_describe("3.2.9-6-gabc1234");
        let version = resolve_version(&VersionSource::FromTags, &repo).unwrap();
        assert_eq!(version.as_str(), "3.2.7");
    }
}
