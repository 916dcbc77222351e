//! Applies the label directives of issues to their labels on GitHub.
use std::collections::HashSet;

use anyhow::Context;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use tracing::Instrument;

use crate::config::ActionConfig;
use crate::github::{ActionEvent, Issue, RepositoryClient};
use crate::labels::{reconcile, DirectivePattern, LabelDiff};
use crate::utils::logging::LogError;
use crate::utils::text::{format_list, pluralize};

/// Handles a single action run triggered by `event`.
///
/// `now` is the reference instant from which scheduled scans look back.
pub async fn run<C: RepositoryClient + ?Sized>(
    client: &C,
    event: ActionEvent,
    config: &ActionConfig,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    match event {
        ActionEvent::Issue(number) => {
            let issue = client.get_issue(number).await?;
            let registered = load_registered_labels(client).await?;
            let span = issue_span(&issue);
            sync_issue_labels(client, &issue, &config.pattern, &registered)
                .instrument(span)
                .await?;
            Ok(())
        }
        ActionEvent::Schedule => {
            let offset = config.offset()?;
            let since = offset.before(now)?;
            tracing::info!("Scanning issues updated in the last {offset} (since {since})");
            scan_issues(client, &config.pattern, since).await
        }
        ActionEvent::Unsupported(name) => {
            tracing::info!("Ignoring unsupported event `{name}`");
            Ok(())
        }
    }
}

/// Synchronizes the labels of all open issues and pull requests updated since `since`.
///
/// A failure on one issue does not stop the scan, but the scan fails once all issues were
/// processed.
pub async fn scan_issues<C: RepositoryClient + ?Sized>(
    client: &C,
    pattern: &DirectivePattern,
    since: DateTime<Utc>,
) -> anyhow::Result<()> {
    let issues = client.list_issues_updated_since(since).await?;
    tracing::debug!(
        "Found {} {}",
        issues.len(),
        pluralize("issue", issues.len())
    );
    if issues.is_empty() {
        return Ok(());
    }
    let registered = load_registered_labels(client).await?;

    let mut failed = Vec::new();
    for issue in &issues {
        let span = issue_span(issue);
        if let Err(error) = sync_issue_labels(client, issue, pattern, &registered)
            .instrument(span.clone())
            .await
        {
            span.log_error(&error);
            failed.push(issue.html_url.as_str());
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "Could not synchronize labels of {} {}:\n{}",
            failed.len(),
            pluralize("issue", failed.len()),
            failed.iter().map(|url| format!("- {url}")).join("\n")
        ))
    }
}

/// Makes the labels of `issue` match the directives in its description.
///
/// Only labels from `registered` are touched. Returns the modifications that were applied.
pub async fn sync_issue_labels<C: RepositoryClient + ?Sized>(
    client: &C,
    issue: &Issue,
    pattern: &DirectivePattern,
    registered: &HashSet<String>,
) -> anyhow::Result<LabelDiff> {
    tracing::debug!("--- {} ---", issue.html_url);

    let current: HashSet<String> = client
        .get_issue_labels(issue.number)
        .await?
        .into_iter()
        .collect();
    let directives = pattern.extract(&issue.body);
    let diff = reconcile(&directives, &current, registered);

    if !diff.has_directives() {
        tracing::debug!("No registered label found in the description");
        return Ok(diff);
    }

    tracing::debug!("Checked labels:\n{}", format_list(&diff.checked));
    tracing::debug!("Labels to remove:\n{}", format_list(&diff.remove));
    if !diff.remove.is_empty() {
        tracing::info!(
            "Removing {} {}: {:?}",
            diff.remove.len(),
            pluralize("label", diff.remove.len()),
            diff.remove
        );
        client.remove_labels(issue.number, &diff.remove).await?;
    }

    tracing::debug!("Labels to add:\n{}", format_list(&diff.add));
    if !diff.add.is_empty() {
        tracing::info!(
            "Adding {} {}: {:?}",
            diff.add.len(),
            pluralize("label", diff.add.len()),
            diff.add
        );
        client.add_labels(issue.number, &diff.add).await?;
    }
    Ok(diff)
}

async fn load_registered_labels<C: RepositoryClient + ?Sized>(
    client: &C,
) -> anyhow::Result<HashSet<String>> {
    let labels = client
        .get_repository_labels()
        .await
        .with_context(|| format!("Cannot load labels of {}", client.repository()))?;
    Ok(labels.into_iter().collect())
}

fn issue_span(issue: &Issue) -> tracing::Span {
    tracing::info_span!("issue", number = issue.number.0, url = %issue.html_url)
}
