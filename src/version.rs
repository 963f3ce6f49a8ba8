use crate::error::{ReleaseError, Result};

/// The version a release is bumped to, exactly as the operator typed it.
///
/// Nothing is validated: a malformed string is written into the files verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionString(String);

impl VersionString {
    pub fn new(version: impl Into<String>) -> Self {
        VersionString(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VersionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Represents a version with major, minor, and patch components.
#[derive(Debug, Clone, PartialEq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl From<Version> for VersionString {
    fn from(version: Version) -> Self {
        VersionString(version.to_string())
    }
}

/// Derives the next version from long `git describe` output.
///
/// `<tag>-<commits>-g<hash>` with a tag of `major.minor[.anything]` yields
/// `major.minor.(commits + 1)`. The tag's own patch number is ignored.
///
/// # Example
/// ```ignore
/// assert_eq!(version_from_describe("10.2.7-4-g1a2b3c4").unwrap(), Version::new(10, 2, 5));
/// ```
pub fn version_from_describe(describe: &str) -> Result<Version> {
    let line = describe.lines().next().unwrap_or("").trim();

    let mut parts = line.rsplitn(3, '-');
    let _hash = parts.next();
    let (commits, tag) = match (parts.next(), parts.next()) {
        (Some(commits), Some(tag)) => (commits, tag),
        _ => {
            return Err(ReleaseError::version(format!(
                "expected <tag>-<commits>-g<hash>, got '{}'",
                line
            )))
        }
    };

    let commits = commits.parse::<u32>().map_err(|_| {
        ReleaseError::version(format!("commit count '{}' is not a number", commits))
    })?;

    let clean_tag = tag.trim_start_matches('v').trim_start_matches('V');
    let mut numbers = clean_tag.split('.');
    let (major, minor) = match (numbers.next(), numbers.next()) {
        (Some(major), Some(minor)) => (major, minor),
        _ => {
            return Err(ReleaseError::version(format!(
                "tag '{}' has no major.minor prefix",
                tag
            )))
        }
    };

    let parse = |part: &str| {
        part.parse::<u32>().map_err(|_| {
            ReleaseError::version(format!("tag '{}' has a non-numeric component", tag))
        })
    };

    let patch = commits.checked_add(1).ok_or_else(|| {
        ReleaseError::version(format!("commit count {} is too large for a patch number", commits))
    })?;

    Ok(Version::new(parse(major)?, parse(minor)?, patch))
}
