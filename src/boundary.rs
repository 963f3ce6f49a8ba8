use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions met while rewriting a release.
/// These never stop the run but should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseWarning {
    /// A configured target pattern matched no file in the base directory
    NoMatchingFiles { pattern: String },
    /// A target file contained neither a version token nor a copyright line
    NoVersionToken { path: PathBuf, prefix: String },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::NoMatchingFiles { pattern } => {
                write!(f, "No files match '{}'", pattern)
            }
            ReleaseWarning::NoVersionToken { path, prefix } => {
                if prefix.is_empty() {
                    write!(f, "No version token found in {}", path.display())
                } else {
                    write!(
                        f,
                        "No '{}<version>' token found in {}",
                        prefix,
                        path.display()
                    )
                }
            }
        }
    }
}
