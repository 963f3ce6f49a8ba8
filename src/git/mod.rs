//! Source-control abstraction layer
//!
//! The release pipeline only needs three things from the repository: commit
//! every modified tracked file, put an annotated tag on the result, and (for
//! tag-derived versions) describe `HEAD` relative to the latest tag.
//!
//! - [repository::Git2Repository]: the real implementation using the `git2` crate
//! - [mock::MockRepository]: records calls, for tests
//!
//! Code should depend on the [Repository] trait rather than a concrete type.
//!
//! ```rust
//! # use release_bump::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> release_bump::Result<()> {
//! let commit = repo.commit_all("update to version 1.4.0")?;
//! repo.create_annotated_tag("1.4.0", "update version")?;
//! # let _ = commit;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Source-control operations used by a release
///
/// All implementors must be `Send`. Errors are reported as
/// [crate::error::ReleaseError::Git] or [crate::error::ReleaseError::SourceControl].
pub trait Repository: Send {
    /// Stage every modified or deleted tracked file and commit it on `HEAD`
    ///
    /// Untracked files are left alone, like `git commit -a`.
    ///
    /// # Returns
    /// * `Ok(String)` - Id of the new commit
    /// * `Err` - If nothing changed, `HEAD` is unborn, or Git fails
    fn commit_all(&self, message: &str) -> Result<String>;

    /// Create an annotated tag on the current `HEAD` commit
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err` - If the tag already exists or Git fails
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Describe `HEAD` against the most recent annotated tag, always in long form
    ///
    /// # Returns
    /// * `Ok(String)` - e.g. `1.2.3-4-g1a2b3c4`
    /// * `Err` - If no annotated tag is reachable
    fn describe_long(&self) -> Result<String>;
}
