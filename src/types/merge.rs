//! Pull request merge strategies and commit status states.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownToken;

/// How a pull request is merged into its base branch.
///
/// Mirrors GitHub's GraphQL `PullRequestMergeMethod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MergeMethod {
    /// Merge commit.
    Merge,
    /// Replay each commit onto the base branch.
    Rebase,
    /// Collapse the branch into a single commit.
    Squash,
}

impl MergeMethod {
    pub fn as_api_str(&self) -> &'static str {
        match self {
            MergeMethod::Merge => "MERGE",
            MergeMethod::Rebase => "REBASE",
            MergeMethod::Squash => "SQUASH",
        }
    }
}

impl fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

impl FromStr for MergeMethod {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MERGE" => Ok(MergeMethod::Merge),
            "REBASE" => Ok(MergeMethod::Rebase),
            "SQUASH" => Ok(MergeMethod::Squash),
            other => Err(UnknownToken::new("merge method", other)),
        }
    }
}

/// The state of a commit status, as the REST statuses endpoint names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitState {
    Error,
    Failure,
    Pending,
    Success,
}

impl CommitState {
    pub fn as_api_str(&self) -> &'static str {
        match self {
            CommitState::Error => "error",
            CommitState::Failure => "failure",
            CommitState::Pending => "pending",
            CommitState::Success => "success",
        }
    }
}

impl fmt::Display for CommitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

impl FromStr for CommitState {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(CommitState::Error),
            "failure" => Ok(CommitState::Failure),
            "pending" => Ok(CommitState::Pending),
            "success" => Ok(CommitState::Success),
            other => Err(UnknownToken::new("commit state", other)),
        }
    }
}
