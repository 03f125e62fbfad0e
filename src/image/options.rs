//! Parameters for image-producing operations

use crate::error::{require, ApiError, Result};
use crate::query::{flag, push_non_empty, QueryParams};
use crate::shape::{Shape, ShapeKind};
use serde::{Deserialize, Serialize};

/// Parameters for committing a container to a new image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommitOptions {
    /// Source container ID or name
    pub container: String,
    pub repo: String,
    pub tag: String,
    /// Commit message
    pub comment: String,
    pub author: String,
}

impl CommitOptions {
    pub fn new(container: &str, repo: &str) -> Self {
        Self {
            container: container.to_string(),
            repo: repo.to_string(),
            ..Self::default()
        }
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.author = author.to_string();
        self
    }
}

impl Shape for CommitOptions {
    const KIND: ShapeKind = ShapeKind::CommitOptions;

    fn validate(&self) -> Result<()> {
        let shape = Self::KIND.wire_name();
        require(shape, "Container", &self.container)?;
        if !self.tag.is_empty() && self.repo.is_empty() {
            return Err(ApiError::validation(shape, "Repo", "is required when Tag is set"));
        }
        Ok(())
    }
}

impl QueryParams for CommitOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("container", self.container.clone())];
        push_non_empty(&mut pairs, "repo", &self.repo);
        push_non_empty(&mut pairs, "tag", &self.tag);
        push_non_empty(&mut pairs, "comment", &self.comment);
        push_non_empty(&mut pairs, "author", &self.author);
        pairs
    }
}

/// Parameters for tagging an image into a repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TagOptions {
    pub repo: String,
    /// Move the tag if it already points at another image
    pub force: bool,
    pub tag: String,
}

impl TagOptions {
    pub fn new(repo: &str, tag: &str) -> Self {
        Self {
            repo: repo.to_string(),
            tag: tag.to_string(),
            force: false,
        }
    }

    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }
}

impl Shape for TagOptions {
    const KIND: ShapeKind = ShapeKind::TagOptions;

    fn validate(&self) -> Result<()> {
        require(Self::KIND.wire_name(), "Repo", &self.repo)
    }
}

impl QueryParams for TagOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("repo", self.repo.clone())];
        push_non_empty(&mut pairs, "tag", &self.tag);
        pairs.push(("force", flag(self.force)));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::construct;
    use serde_json::json;

    #[test]
    fn test_commit_query() {
        let opts = CommitOptions::new("44c004db4b17", "myrepo/app")
            .tag("v1")
            .author("ops@example.com");
        assert!(opts.validate().is_ok());
        assert_eq!(
            opts.query_pairs(),
            vec![
                ("container", "44c004db4b17".to_string()),
                ("repo", "myrepo/app".to_string()),
                ("tag", "v1".to_string()),
                ("author", "ops@example.com".to_string()),
            ]
        );
    }

    #[test]
    fn test_commit_requires_container() {
        let err = construct::<CommitOptions>(json!({"Repo": "app"})).unwrap_err();
        assert!(err.is_validation());
        let tag_only = CommitOptions {
            container: "web".to_string(),
            tag: "v1".to_string(),
            ..CommitOptions::default()
        };
        assert!(tag_only.validate().is_err());
    }

    #[test]
    fn test_tag_query() {
        let opts = TagOptions::new("registry.local/app", "stable").force();
        assert_eq!(
            opts.query_pairs(),
            vec![
                ("repo", "registry.local/app".to_string()),
                ("tag", "stable".to_string()),
                ("force", "1".to_string()),
            ]
        );
        assert!(construct::<TagOptions>(json!({"Tag": "x"})).is_err());
    }
}
