use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::github::{GithubRepoName, Issue, IssueNumber, RepositoryClient};

pub fn default_repo_name() -> GithubRepoName {
    GithubRepoName::new("owner", "name")
}

/// Fixed "current" instant, so that scheduled scans are deterministic.
pub fn default_now() -> DateTime<Utc> {
    "2020-10-10T10:10:10Z".parse().unwrap()
}

struct TestIssue {
    body: String,
    updated_at: DateTime<Utc>,
}

/// In-memory repository that records every label modification.
pub struct TestRepositoryClient {
    name: GithubRepoName,
    registered_labels: Vec<String>,
    issues: BTreeMap<u64, TestIssue>,
    // Issues whose labels cannot be loaded.
    failing_issues: HashSet<u64>,
    // Issue number -> labels currently applied
    issue_labels: Mutex<HashMap<u64, Vec<String>>>,
    added_labels: Mutex<HashMap<u64, Vec<String>>>,
    removed_labels: Mutex<HashMap<u64, Vec<String>>>,
}

impl TestRepositoryClient {
    pub fn new() -> Self {
        Self {
            name: default_repo_name(),
            registered_labels: Vec::new(),
            issues: BTreeMap::new(),
            failing_issues: HashSet::new(),
            issue_labels: Default::default(),
            added_labels: Default::default(),
            removed_labels: Default::default(),
        }
    }

    pub fn with_registered_labels(mut self, labels: &[&str]) -> Self {
        self.registered_labels = labels.iter().map(|label| label.to_string()).collect();
        self
    }

    /// Adds an issue updated at [`default_now`].
    pub fn with_issue(self, number: u64, body: &str, labels: &[&str]) -> Self {
        self.with_stale_issue(number, body, labels, default_now())
    }

    pub fn with_stale_issue(
        mut self,
        number: u64,
        body: &str,
        labels: &[&str],
        updated_at: DateTime<Utc>,
    ) -> Self {
        self.issues.insert(
            number,
            TestIssue {
                body: body.to_string(),
                updated_at,
            },
        );
        self.issue_labels.get_mut().unwrap().insert(
            number,
            labels.iter().map(|label| label.to_string()).collect(),
        );
        self
    }

    pub fn with_failing_issue(mut self, number: u64) -> Self {
        self.failing_issues.insert(number);
        self
    }

    // Checks
    pub fn check_added_labels(&self, issue: u64, added: &[&str]) -> &Self {
        assert_eq!(
            self.added_labels
                .lock()
                .unwrap()
                .get(&issue)
                .cloned()
                .unwrap_or_default(),
            added
        );
        self
    }

    pub fn check_removed_labels(&self, issue: u64, removed: &[&str]) -> &Self {
        assert_eq!(
            self.removed_labels
                .lock()
                .unwrap()
                .get(&issue)
                .cloned()
                .unwrap_or_default(),
            removed
        );
        self
    }

    pub fn check_issue_labels(&self, issue: u64, labels: &[&str]) -> &Self {
        assert_eq!(self.issue_labels.lock().unwrap()[&issue], labels);
        self
    }

    fn to_issue(&self, number: u64) -> anyhow::Result<Issue> {
        let issue = self
            .issues
            .get(&number)
            .ok_or_else(|| anyhow::anyhow!("Issue {number} not found"))?;
        Ok(Issue {
            number: IssueNumber(number),
            html_url: format!("https://github.com/{}/issues/{number}", self.name).parse()?,
            body: issue.body.clone(),
        })
    }
}

#[async_trait]
impl RepositoryClient for TestRepositoryClient {
    fn repository(&self) -> &GithubRepoName {
        &self.name
    }

    async fn get_issue(&self, issue: IssueNumber) -> anyhow::Result<Issue> {
        self.to_issue(issue.0)
    }

    async fn get_issue_labels(&self, issue: IssueNumber) -> anyhow::Result<Vec<String>> {
        if self.failing_issues.contains(&issue.0) {
            return Err(anyhow::anyhow!("Cannot list labels of issue {issue}"));
        }
        Ok(self
            .issue_labels
            .lock()
            .unwrap()
            .get(&issue.0)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_repository_labels(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.registered_labels.clone())
    }

    async fn list_issues_updated_since(
        &self,
        since: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Issue>> {
        self.issues
            .iter()
            .filter(|(_, issue)| issue.updated_at >= since)
            .map(|(number, _)| self.to_issue(*number))
            .collect()
    }

    async fn add_labels(&self, issue: IssueNumber, labels: &[String]) -> anyhow::Result<()> {
        self.added_labels
            .lock()
            .unwrap()
            .entry(issue.0)
            .or_default()
            .extend(labels.iter().cloned());
        let mut issue_labels = self.issue_labels.lock().unwrap();
        let applied = issue_labels.entry(issue.0).or_default();
        for label in labels {
            if !applied.contains(label) {
                applied.push(label.clone());
            }
        }
        Ok(())
    }

    async fn remove_labels(&self, issue: IssueNumber, labels: &[String]) -> anyhow::Result<()> {
        self.removed_labels
            .lock()
            .unwrap()
            .entry(issue.0)
            .or_default()
            .extend(labels.iter().cloned());
        self.issue_labels
            .lock()
            .unwrap()
            .entry(issue.0)
            .or_default()
            .retain(|label| !labels.contains(label));
        Ok(())
    }
}
