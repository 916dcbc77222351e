//! The GitHub Actions event that triggered a run.
use std::path::Path;

use anyhow::Context;

use crate::github::IssueNumber;

/// Events the action reacts to.
#[derive(Debug, PartialEq, Eq)]
pub enum ActionEvent {
    /// An issue or a pull request was opened or edited.
    Issue(IssueNumber),
    /// A scheduled run, which scans all recently updated issues.
    Schedule,
    /// Any other event, which is ignored.
    Unsupported(String),
}

#[derive(serde::Deserialize, Debug)]
struct NumberPayload {
    number: u64,
}

/// The part of an `issues` or `pull_request` webhook payload that identifies the issue.
#[derive(serde::Deserialize, Debug)]
struct IssueEventPayload {
    issue: Option<NumberPayload>,
    pull_request: Option<NumberPayload>,
    number: Option<u64>,
}

impl ActionEvent {
    /// Loads the event from the name in `GITHUB_EVENT_NAME` and the payload file in
    /// `GITHUB_EVENT_PATH`. The payload is only read for events that need it.
    pub fn load(event_name: &str, event_path: Option<&Path>) -> anyhow::Result<Self> {
        if !is_issue_event(event_name) {
            return Self::parse(event_name, b"{}");
        }
        let Some(path) = event_path else {
            return Err(anyhow::anyhow!(
                "The `{event_name}` event requires a payload, but no event path was given"
            ));
        };
        let payload = std::fs::read(path)
            .with_context(|| format!("Cannot read event payload {}", path.display()))?;
        Self::parse(event_name, &payload)
    }

    pub fn parse(event_name: &str, payload: &[u8]) -> anyhow::Result<Self> {
        if event_name == "schedule" {
            return Ok(Self::Schedule);
        }
        if !is_issue_event(event_name) {
            return Ok(Self::Unsupported(event_name.to_string()));
        }

        let payload: IssueEventPayload = serde_json::from_slice(payload)
            .with_context(|| format!("Cannot parse `{event_name}` event payload"))?;
        payload
            .issue
            .or(payload.pull_request)
            .map(|issue| issue.number)
            .or(payload.number)
            .map(|number| Self::Issue(number.into()))
            .ok_or_else(|| {
                anyhow::anyhow!("The `{event_name}` event payload does not contain an issue number")
            })
    }
}

fn is_issue_event(event_name: &str) -> bool {
    matches!(event_name, "issues" | "pull_request" | "pull_request_target")
}
