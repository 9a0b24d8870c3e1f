//! Check run status and conclusion vocabularies.
//!
//! Both mirror GitHub's GraphQL `CheckStatusState` and `CheckConclusionState`
//! enums. The mapping to wire tokens is an exhaustive `match`, so a new platform
//! value has to be added here explicitly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownToken;

/// Where a check run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckRunStatus {
    Queued,
    InProgress,
    /// Terminal. A completed check run always carries a conclusion.
    Completed,
}

impl CheckRunStatus {
    /// Returns the GraphQL enum token for this status.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            CheckRunStatus::Queued => "QUEUED",
            CheckRunStatus::InProgress => "IN_PROGRESS",
            CheckRunStatus::Completed => "COMPLETED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckRunStatus::Completed)
    }
}

impl fmt::Display for CheckRunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

impl FromStr for CheckRunStatus {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QUEUED" => Ok(CheckRunStatus::Queued),
            "IN_PROGRESS" => Ok(CheckRunStatus::InProgress),
            "COMPLETED" => Ok(CheckRunStatus::Completed),
            other => Err(UnknownToken::new("check run status", other)),
        }
    }
}

/// The terminal outcome attached to a completed check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckConclusion {
    ActionRequired,
    Cancelled,
    Failure,
    Neutral,
    Skipped,
    Stale,
    Success,
    TimedOut,
}

impl CheckConclusion {
    /// Every conclusion, in wire order.
    pub const ALL: [CheckConclusion; 8] = [
        CheckConclusion::ActionRequired,
        CheckConclusion::Cancelled,
        CheckConclusion::Failure,
        CheckConclusion::Neutral,
        CheckConclusion::Skipped,
        CheckConclusion::Stale,
        CheckConclusion::Success,
        CheckConclusion::TimedOut,
    ];

    /// Returns the GraphQL enum token for this conclusion.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            CheckConclusion::ActionRequired => "ACTION_REQUIRED",
            CheckConclusion::Cancelled => "CANCELLED",
            CheckConclusion::Failure => "FAILURE",
            CheckConclusion::Neutral => "NEUTRAL",
            CheckConclusion::Skipped => "SKIPPED",
            CheckConclusion::Stale => "STALE",
            CheckConclusion::Success => "SUCCESS",
            CheckConclusion::TimedOut => "TIMED_OUT",
        }
    }
}

impl fmt::Display for CheckConclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

impl FromStr for CheckConclusion {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckConclusion::ALL
            .into_iter()
            .find(|c| c.as_api_str() == s)
            .ok_or_else(|| UnknownToken::new("check conclusion", s))
    }
}
