//! Chooses GraphQL or REST per operation.
//!
//! Most operations only exist in GraphQL and status checks and column cards only
//! exist in REST. Issue milestones exist in both. Some GitHub Enterprise
//! versions reject `updateIssue` from apps, so the milestone path is configured
//! rather than fixed.

use std::fmt;

/// Every operation in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    MoveCard,
    PostComment,
    UpdateMilestone,
    ClosePullRequest,
    MergePullRequest,
    CreateCheckRun,
    UpdateCheckRun,
    AddLabels,
    RemoveLabels,
    SendStatusCheck,
    AddItemToColumn,
}

impl Operation {
    /// Name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::MoveCard => "move_card_to_column",
            Operation::PostComment => "post_comment",
            Operation::UpdateMilestone => "update_milestone",
            Operation::ClosePullRequest => "close_pull_request",
            Operation::MergePullRequest => "merge_pull_request",
            Operation::CreateCheckRun => "create_check_run",
            Operation::UpdateCheckRun => "update_check_run",
            Operation::AddLabels => "add_labels",
            Operation::RemoveLabels => "remove_labels",
            Operation::SendStatusCheck => "send_status_check",
            Operation::AddItemToColumn => "add_item_to_column",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two ways a request can leave the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    /// GraphQL.
    Structured,
    /// REST.
    Legacy,
}

/// Which optional operations the platform's GraphQL API supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiCoverage {
    /// Whether `updateIssue` may set milestones.
    pub structured_milestones: bool,
}

impl Default for ApiCoverage {
    fn default() -> Self {
        ApiCoverage {
            structured_milestones: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportSelector {
    coverage: ApiCoverage,
}

impl TransportSelector {
    pub fn new(coverage: ApiCoverage) -> Self {
        TransportSelector { coverage }
    }

    pub fn coverage(&self) -> ApiCoverage {
        self.coverage
    }

    pub fn transport_for(&self, operation: Operation) -> Transport {
        match operation {
            Operation::SendStatusCheck | Operation::AddItemToColumn => Transport::Legacy,
            Operation::UpdateMilestone if !self.coverage.structured_milestones => {
                Transport::Legacy
            }
            Operation::MoveCard
            | Operation::PostComment
            | Operation::UpdateMilestone
            | Operation::ClosePullRequest
            | Operation::MergePullRequest
            | Operation::CreateCheckRun
            | Operation::UpdateCheckRun
            | Operation::AddLabels
            | Operation::RemoveLabels => Transport::Structured,
        }
    }
}
