use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use std::cell::RefCell;

/// An annotated tag recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedTag {
    pub name: String,
    pub message: String,
}

/// Mock repository for testing without actual git operations
#[derive(Default)]
pub struct MockRepository {
    commits: RefCell<Vec<String>>,
    tags: RefCell<Vec<RecordedTag>>,
    describe: Option<String>,
    commit_failure: Option<String>,
    tag_failure: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Output returned by [Repository::describe_long]
    pub fn with_describe(mut self, describe: impl Into<String>) -> Self {
        self.describe = Some(describe.into());
        self
    }

    /// Make every commit fail with `reason`
    pub fn failing_commit(mut self, reason: impl Into<String>) -> Self {
        self.commit_failure = Some(reason.into());
        self
    }

    /// Make every tag creation fail with `reason`
    pub fn failing_tag(mut self, reason: impl Into<String>) -> Self {
        self.tag_failure = Some(reason.into());
        self
    }

    /// Commit messages, oldest first
    pub fn commits(&self) -> Vec<String> {
        self.commits.borrow().clone()
    }

    /// Tags, oldest first
    pub fn tags(&self) -> Vec<RecordedTag> {
        self.tags.borrow().clone()
    }
}

impl Repository for MockRepository {
    fn commit_all(&self, message: &str) -> Result<String> {
        if let Some(reason) = &self.commit_failure {
            return Err(ReleaseError::source_control(reason.clone()));
        }

        let mut commits = self.commits.borrow_mut();
        commits.push(message.to_string());
        Ok(format!("mock{:036}", commits.len()))
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        if let Some(reason) = &self.tag_failure {
            return Err(ReleaseError::source_control(reason.clone()));
        }

        let mut tags = self.tags.borrow_mut();
        if tags.iter().any(|tag| tag.name == name) {
            return Err(ReleaseError::source_control(format!(
                "Cannot create tag '{}': already exists",
                name
            )));
        }
        tags.push(RecordedTag {
            name: name.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn describe_long(&self) -> Result<String> {
        self.describe
            .clone()
            .ok_or_else(|| ReleaseError::source_control("No annotated tag found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_commit_and_tag() {
        let repo = MockRepository::new();

        let id = repo.commit_all("update to version 1.0.0").unwrap();
        repo.create_annotated_tag("1.0.0", "update version").unwrap();

        assert_eq!(id.len(), 40);
        assert_eq!(repo.commits(), vec!["update to version 1.0.0".to_string()]);
        assert_eq!(
            repo.tags(),
            vec![RecordedTag {
                name: "1.0.0".to_string(),
                message: "update version".to_string()
            }]
        );
    }

    #[test]
    fn test_mock_rejects_duplicate_tag() {
        let repo = MockRepository::new();
        repo.create_annotated_tag("1.0.0", "update version").unwrap();
        assert!(repo.create_annotated_tag("1.0.0", "update version").is_err());
    }

    #[test]
    fn test_mock_failures() {
        let repo = MockRepository::new()
            .failing_commit("hook rejected commit")
            .failing_tag("no tagger");

        assert!(repo
            .commit_all("x")
            .unwrap_err()
            .to_string()
            .contains("hook rejected commit"));
        assert!(repo.create_annotated_tag("1.0.0", "x").is_err());
        assert!(repo.commits().is_empty());
    }

    #[test]
    fn test_mock_describe() {
        assert!(MockRepository::new().describe_long().is_err());
        let repo = MockRepository::new().with_describe("1.2.3-4-gabc1234");
        assert_eq!(repo.describe_long().unwrap(), "1.2.3-4-gabc1234");
    }
}
