use crate::error::{ReleaseError, Result};
use git2::{DescribeFormatOptions, DescribeOptions, ObjectType, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Discover the repository containing `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path.as_ref()).map_err(|e| {
            ReleaseError::source_control(format!(
                "Not in a git repository ({}): {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Ok(Git2Repository { repo })
    }
}

impl super::Repository for Git2Repository {
    fn commit_all(&self, message: &str) -> Result<String> {
        let parent = self.repo.head()?.peel_to_commit().map_err(|e| {
            ReleaseError::source_control(format!("HEAD does not point at a commit: {}", e))
        })?;

        let mut index = self.repo.index()?;
        // update_all only touches entries already in the index
        index.update_all(["*"], None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        if tree_id == parent.tree_id() {
            return Err(ReleaseError::source_control(
                "nothing to commit, working tree clean",
            ));
        }

        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;

        log::info!("committed {} \"{}\"", oid, message);
        Ok(oid.to_string())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let target = self.repo.head()?.peel(ObjectType::Commit)?;
        let tagger = self.repo.signature()?;

        self.repo
            .tag(name, &target, &tagger, message, false)
            .map_err(|e| ReleaseError::source_control(format!("Cannot create tag '{}': {}", name, e)))?;

        log::info!("tagged {} as {}", target.id(), name);
        Ok(())
    }

    fn describe_long(&self) -> Result<String> {
        let describe = self
            .repo
            .describe(&DescribeOptions::new())
            .map_err(|e| ReleaseError::source_control(format!("Cannot describe HEAD: {}", e)))?;

        let mut format = DescribeFormatOptions::new();
        format.always_use_long_format(true);
        Ok(describe.format(Some(&format))?)
    }
}
