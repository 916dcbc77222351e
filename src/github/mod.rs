//! Contains definitions of common types (issue, repository name) needed for working with GitHub
//! repositories, and the client used to read and modify their labels.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use url::Url;

use crate::config::ConfigError;

pub mod client;
pub mod event;

pub use client::GithubRepositoryClient;
pub use event::ActionEvent;

/// Unique identifier of a GitHub repository
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct GithubRepoName {
    owner: String,
    name: String,
}

impl GithubRepoName {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.to_lowercase(),
            name: name.to_lowercase(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for GithubRepoName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}/{}", self.owner, self.name))
    }
}

/// Parses `<owner>/<name>`, the format of `GITHUB_REPOSITORY`.
impl FromStr for GithubRepoName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self::new(owner, name))
            }
            _ => Err(ConfigError::InvalidRepository(s.to_string())),
        }
    }
}

/// Number of an issue or a pull request. Pull requests share the numbering of issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IssueNumber(pub u64);

impl From<u64> for IssueNumber {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for IssueNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <u64 as Display>::fmt(&self.0, f)
    }
}

/// The parts of an issue (or pull request) needed to synchronize its labels.
#[derive(Clone, Debug)]
pub struct Issue {
    pub number: IssueNumber,
    pub html_url: Url,
    /// The description of the issue, empty if it has none.
    pub body: String,
}

/// Provides access to the labels of a single repository.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    fn repository(&self) -> &GithubRepoName;

    /// Resolve an issue or a pull request by its number.
    async fn get_issue(&self, issue: IssueNumber) -> anyhow::Result<Issue>;

    /// Names of the labels applied to the given issue.
    async fn get_issue_labels(&self, issue: IssueNumber) -> anyhow::Result<Vec<String>>;

    /// Names of all labels registered in the repository.
    async fn get_repository_labels(&self) -> anyhow::Result<Vec<String>>;

    /// Open issues and pull requests updated at or after `since`.
    async fn list_issues_updated_since(&self, since: DateTime<Utc>) -> anyhow::Result<Vec<Issue>>;

    /// Add a set of labels to an issue.
    async fn add_labels(&self, issue: IssueNumber, labels: &[String]) -> anyhow::Result<()>;

    /// Remove a set of labels from an issue.
    async fn remove_labels(&self, issue: IssueNumber, labels: &[String]) -> anyhow::Result<()>;
}
