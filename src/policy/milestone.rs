//! Milestone reconciliation for issues closed by a pull request.
//!
//! When a pull request closes an issue, the issue should end up in the same
//! milestone as the pull request:
//!
//! | PR milestone | Issue milestone | Action                                    |
//! |--------------|-----------------|-------------------------------------------|
//! | none         | any             | nothing                                   |
//! | M            | none            | set the issue's milestone to M            |
//! | M            | M               | nothing                                   |
//! | M            | N ≠ M           | set to M and comment, concurrently        |
//!
//! Reconciliation always goes through GraphQL `updateIssue`, whatever
//! `ApiCoverage` says. An [`IssueCloserInfo`] carries node IDs only, and the
//! REST milestone endpoint wants the issue and milestone numbers, so
//! `BOT_LEGACY_MILESTONES` does not reroute it. Callers that hold numbers use
//! `Bot::set_milestone`, which does follow the selector.

use crate::effects::StructuredTransport;
use crate::mutations::{Bot, report_comment};
use crate::types::{IssueCloserInfo, NodeId};

/// What reconciliation does for one closed issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MilestoneDecision {
    /// The pull request has no milestone to copy.
    NoPullRequestMilestone,
    /// The issue is already in the pull request's milestone.
    AlreadyMatching,
    /// The issue has no milestone; give it the pull request's.
    Assign(NodeId),
    /// The issue is in a different milestone; move it and explain why.
    Replace { previous: NodeId, milestone: NodeId },
}

impl MilestoneDecision {
    /// Whether this decision leads to any mutating call.
    pub fn is_noop(&self) -> bool {
        matches!(
            self,
            MilestoneDecision::NoPullRequestMilestone | MilestoneDecision::AlreadyMatching
        )
    }
}

/// Decides what to do without touching the network.
pub fn decide_milestone(info: &IssueCloserInfo) -> MilestoneDecision {
    match (&info.pull_request_milestone, &info.issue_milestone) {
        (None, _) => MilestoneDecision::NoPullRequestMilestone,
        (Some(pr), None) => MilestoneDecision::Assign(pr.clone()),
        (Some(pr), Some(issue)) if pr == issue => MilestoneDecision::AlreadyMatching,
        (Some(pr), Some(issue)) => MilestoneDecision::Replace {
            previous: issue.clone(),
            milestone: pr.clone(),
        },
    }
}

const REPLACED_MILESTONE_COMMENT: &str = "The milestone of this issue was changed to match the \
    milestone of the pull request that closed it.";

/// Applies [`decide_milestone`] to an issue.
///
/// In the replace case the milestone update and the explanatory comment run
/// concurrently, and this returns once both have finished.
pub async fn reconcile_milestone<T: StructuredTransport>(
    bot: &Bot<T>,
    info: &IssueCloserInfo,
) -> MilestoneDecision {
    let decision = decide_milestone(info);
    match &decision {
        MilestoneDecision::NoPullRequestMilestone => {
            tracing::info!(
                issue = %info.issue,
                "Closing pull request has no milestone, leaving issue as is"
            );
        }
        MilestoneDecision::AlreadyMatching => {
            tracing::info!(
                issue = %info.issue,
                "Issue is already in the pull request's milestone"
            );
        }
        MilestoneDecision::Assign(milestone) => {
            bot.update_milestone(&info.issue, milestone).await;
        }
        MilestoneDecision::Replace {
            previous,
            milestone,
        } => {
            tracing::info!(
                issue = %info.issue,
                previous = %previous,
                milestone = %milestone,
                "Replacing issue milestone with the pull request's"
            );
            let ((), comment) = tokio::join!(
                bot.update_milestone(&info.issue, milestone),
                bot.post_comment(&info.issue, REPLACED_MILESTONE_COMMENT),
            );
            tracing::info!(issue = %info.issue, "{}", report_comment(&comment));
        }
    }
    decision
}
