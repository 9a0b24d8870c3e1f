//! Milestone snapshot taken when a pull request closes an issue.

use serde::{Deserialize, Serialize};

use super::ids::NodeId;

/// Compares an issue's milestone with the milestone of the pull request that
/// closed it.
///
/// Built from a webhook payload by the caller, consumed once by
/// [`reconcile_milestone`](crate::policy::reconcile_milestone).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCloserInfo {
    /// The closed issue.
    pub issue: NodeId,
    /// The issue's milestone at close time.
    pub issue_milestone: Option<NodeId>,
    /// The closing pull request's milestone.
    pub pull_request_milestone: Option<NodeId>,
}

impl IssueCloserInfo {
    pub fn new(
        issue: NodeId,
        issue_milestone: Option<NodeId>,
        pull_request_milestone: Option<NodeId>,
    ) -> Self {
        IssueCloserInfo {
            issue,
            issue_milestone,
            pull_request_milestone,
        }
    }
}
