//! Core domain types for the mutation layer.
//!
//! Identifiers, closed wire vocabularies, and the snapshots policies consume.

use thiserror::Error;

pub mod check_run;
pub mod ids;
pub mod merge;
pub mod milestone;

pub use check_run::{CheckConclusion, CheckRunStatus};
pub use ids::{ColumnId, ContentId, IssueAddress, IssueRef, MilestoneRef, NodeId, RepoId, Sha};
pub use merge::{CommitState, MergeMethod};
pub use milestone::IssueCloserInfo;

/// A wire token that doesn't belong to the expected vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {vocabulary} token: {token}")]
pub struct UnknownToken {
    pub vocabulary: &'static str,
    pub token: String,
}

impl UnknownToken {
    pub fn new(vocabulary: &'static str, token: impl Into<String>) -> Self {
        UnknownToken {
            vocabulary,
            token: token.into(),
        }
    }
}
