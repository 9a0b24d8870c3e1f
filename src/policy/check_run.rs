//! Check run lifecycle.
//!
//! A check run starts life through `create_check_run`, which is the only way to
//! obtain a [`CheckRun`] handle. Every later transition goes through
//! `update_check_run` with that handle and always lands on `COMPLETED` with a
//! conclusion:
//!
//! ```text
//! absent ──create──▶ QUEUED | IN_PROGRESS | COMPLETED
//!                         └──────update──────▶ COMPLETED(conclusion)
//! ```
//!
//! There is no listing or lookup, so a check run this bot didn't create can't
//! be updated through it.

use std::fmt;

use crate::effects::graphql::{CheckRunOutput, CreateCheckRunInput, UpdateCheckRunInput};
use crate::mutations::MutationError;
use crate::types::{CheckConclusion, CheckRunStatus, NodeId, Sha};

/// Handle to a check run created by this bot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CheckRun {
    id: NodeId,
    url: String,
    repository: NodeId,
}

impl CheckRun {
    pub(crate) fn new(id: NodeId, url: String, repository: NodeId) -> Self {
        CheckRun {
            id,
            url,
            repository,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// The check run's page on the platform.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The repository the check run was created in.
    pub fn repository(&self) -> &NodeId {
        &self.repository
    }
}

impl fmt::Display for CheckRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Parameters for creating a check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckRun {
    pub repository: NodeId,
    pub head_sha: Sha,
    pub name: String,
    pub status: CheckRunStatus,
    pub title: String,
    pub summary: String,
    pub details_url: String,
    /// Required when `status` is `Completed`, forbidden otherwise.
    pub conclusion: Option<CheckConclusion>,
    pub text: Option<String>,
    /// An identifier on the caller's side (e.g. a CI job ID).
    pub external_id: Option<String>,
}

impl NewCheckRun {
    /// A queued check run with no conclusion.
    pub fn new(
        repository: NodeId,
        head_sha: Sha,
        name: impl Into<String>,
        title: impl Into<String>,
        summary: impl Into<String>,
        details_url: impl Into<String>,
    ) -> Self {
        NewCheckRun {
            repository,
            head_sha,
            name: name.into(),
            status: CheckRunStatus::Queued,
            title: title.into(),
            summary: summary.into(),
            details_url: details_url.into(),
            conclusion: None,
            text: None,
            external_id: None,
        }
    }

    pub fn in_progress(mut self) -> Self {
        self.status = CheckRunStatus::InProgress;
        self.conclusion = None;
        self
    }

    /// Creates the check run already completed.
    pub fn completed(mut self, conclusion: CheckConclusion) -> Self {
        self.status = CheckRunStatus::Completed;
        self.conclusion = Some(conclusion);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    pub(crate) fn into_input(self) -> Result<CreateCheckRunInput, MutationError> {
        match (self.status, self.conclusion) {
            (CheckRunStatus::Completed, None) => {
                return Err(MutationError::invalid_request(format!(
                    "Check run {} is COMPLETED but has no conclusion",
                    self.name
                )));
            }
            (status @ (CheckRunStatus::Queued | CheckRunStatus::InProgress), Some(conclusion)) => {
                return Err(MutationError::invalid_request(format!(
                    "Check run {} is {} but has conclusion {}",
                    self.name, status, conclusion
                )));
            }
            _ => {}
        }

        Ok(CreateCheckRunInput {
            repository_id: self.repository,
            head_sha: self.head_sha,
            name: self.name,
            status: self.status,
            details_url: self.details_url,
            conclusion: self.conclusion,
            external_id: self.external_id,
            output: CheckRunOutput {
                title: self.title,
                summary: self.summary,
                text: self.text,
            },
        })
    }
}

/// The terminal update for a check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRunCompletion {
    pub conclusion: CheckConclusion,
    pub title: String,
    pub summary: String,
    /// Replaces the details URL given at creation, if set.
    pub details_url: Option<String>,
    pub text: Option<String>,
}

impl CheckRunCompletion {
    pub fn new(
        conclusion: CheckConclusion,
        title: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        CheckRunCompletion {
            conclusion,
            title: title.into(),
            summary: summary.into(),
            details_url: None,
            text: None,
        }
    }

    pub fn with_details_url(mut self, details_url: impl Into<String>) -> Self {
        self.details_url = Some(details_url.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub(crate) fn into_input(self, check_run: &CheckRun) -> UpdateCheckRunInput {
        UpdateCheckRunInput {
            check_run_id: check_run.id.clone(),
            repository_id: check_run.repository.clone(),
            status: CheckRunStatus::Completed,
            conclusion: self.conclusion,
            details_url: self.details_url,
            output: CheckRunOutput {
                title: self.title,
                summary: self.summary,
                text: self.text,
            },
        }
    }
}
