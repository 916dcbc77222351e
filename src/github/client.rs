use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::params::State;
use octocrab::{Error, Octocrab};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::github::{GithubRepoName, Issue, IssueNumber, RepositoryClient};

/// Page size used for every listing, the maximum allowed by the GitHub API.
const PER_PAGE: u8 = 100;

/// Provides access to a single repository using the GitHub API.
pub struct GithubRepositoryClient {
    client: Octocrab,
    repo_name: GithubRepoName,
}

impl GithubRepositoryClient {
    /// Creates a client authenticated with `token`. `api_url` overrides the API location, e.g.
    /// for GitHub Enterprise Server.
    pub fn new(
        token: SecretString,
        repo_name: GithubRepoName,
        api_url: Option<&Url>,
    ) -> anyhow::Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.expose_secret().to_string());
        if let Some(url) = api_url {
            builder = builder
                .base_uri(url.as_str())
                .with_context(|| format!("Invalid GitHub API URL {url}"))?;
        }
        let client = builder
            .build()
            .context("Could not create octocrab client")?;
        Ok(Self { client, repo_name })
    }

    pub fn client(&self) -> &Octocrab {
        &self.client
    }

    pub fn name(&self) -> &GithubRepoName {
        &self.repo_name
    }

    fn format_issue(&self, issue: IssueNumber) -> String {
        format!("{}/{}#{}", self.name().owner(), self.name().name(), issue)
    }
}

#[async_trait]
impl RepositoryClient for GithubRepositoryClient {
    fn repository(&self) -> &GithubRepoName {
        self.name()
    }

    async fn get_issue(&self, issue: IssueNumber) -> anyhow::Result<Issue> {
        let response = self
            .client
            .issues(self.name().owner(), self.name().name())
            .get(issue.0)
            .await
            .with_context(|| format!("Could not get issue {}", self.format_issue(issue)))?;
        Ok(github_issue_to_issue(response))
    }

    async fn get_issue_labels(&self, issue: IssueNumber) -> anyhow::Result<Vec<String>> {
        let page = self
            .client
            .issues(self.name().owner(), self.name().name())
            .list_labels_for_issue(issue.0)
            .per_page(PER_PAGE)
            .send()
            .await
            .with_context(|| format!("Cannot list labels of {}", self.format_issue(issue)))?;
        let labels = self
            .client
            .all_pages(page)
            .await
            .with_context(|| format!("Cannot list labels of {}", self.format_issue(issue)))?;
        Ok(labels.into_iter().map(|label| label.name).collect())
    }

    async fn get_repository_labels(&self) -> anyhow::Result<Vec<String>> {
        let page = self
            .client
            .issues(self.name().owner(), self.name().name())
            .list_labels_for_repo()
            .per_page(PER_PAGE)
            .send()
            .await
            .with_context(|| format!("Cannot list labels of repository {}", self.name()))?;
        let labels = self
            .client
            .all_pages(page)
            .await
            .with_context(|| format!("Cannot list labels of repository {}", self.name()))?;
        Ok(labels.into_iter().map(|label| label.name).collect())
    }

    async fn list_issues_updated_since(
        &self,
        since: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Issue>> {
        // Lists pull requests as well, GitHub treats them as issues.
        let page = self
            .client
            .issues(self.name().owner(), self.name().name())
            .list()
            .state(State::Open)
            .since(since)
            .per_page(PER_PAGE)
            .send()
            .await
            .with_context(|| format!("Cannot list issues of repository {}", self.name()))?;
        let issues = self
            .client
            .all_pages(page)
            .await
            .with_context(|| format!("Cannot list issues of repository {}", self.name()))?;
        Ok(issues.into_iter().map(github_issue_to_issue).collect())
    }

    async fn add_labels(&self, issue: IssueNumber, labels: &[String]) -> anyhow::Result<()> {
        let client = self.client.issues(self.name().owner(), self.name().name());
        if !labels.is_empty() {
            client
                .add_labels(issue.0, labels)
                .await
                .with_context(|| format!("Cannot add label(s) to {}", self.format_issue(issue)))?;
        }

        Ok(())
    }

    async fn remove_labels(&self, issue: IssueNumber, labels: &[String]) -> anyhow::Result<()> {
        let client = self.client.issues(self.name().owner(), self.name().name());
        // The GitHub API only allows removing labels one by one, so we remove all of them in
        // parallel to speed it up a little.
        let labels_to_remove_futures = labels
            .iter()
            .map(|label| client.remove_label(issue.0, label));
        futures::future::join_all(labels_to_remove_futures)
            .await
            .into_iter()
            .filter(|result| match result {
                Ok(_) => false,
                Err(error) => match error {
                    // The label might have been removed by someone else in the meantime.
                    Error::GitHub { source, .. }
                        if source.message.contains("Label does not exist") =>
                    {
                        tracing::trace!(
                            "Trying to remove label which does not exist on {}",
                            self.format_issue(issue)
                        );
                        false
                    }
                    _ => true,
                },
            })
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| {
                format!("Cannot remove label(s) from {}", self.format_issue(issue))
            })?;

        Ok(())
    }
}

fn github_issue_to_issue(issue: octocrab::models::issues::Issue) -> Issue {
    Issue {
        number: issue.number.into(),
        html_url: issue.html_url,
        body: issue.body.unwrap_or_default(),
    }
}
