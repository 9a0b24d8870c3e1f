//! GraphQL mutation documents and their typed inputs.
//!
//! Every document takes a single `$input` variable, so each mutation's
//! variables are `{"input": <the input struct>}`. Optional inputs are skipped
//! when absent rather than sent as `null`, except where `null` is meaningful
//! (clearing a milestone).

use serde::{Deserialize, Serialize};

use super::Replay;
use crate::types::{CheckConclusion, CheckRunStatus, MergeMethod, NodeId, Sha};

/// A named GraphQL mutation document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationDocument {
    /// The top-level mutation field, which is also the key of its payload
    /// inside the response's `data` object.
    pub operation: &'static str,
    /// Whether the platform ends up in the same state if this runs twice.
    pub replay: Replay,
    pub query: &'static str,
}

/// A serialized GraphQL request, ready for the structured transport.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQlRequest {
    pub operation: &'static str,
    pub replay: Replay,
    pub query: &'static str,
    pub variables: serde_json::Value,
}

/// Wraps an input struct as the `$input` variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputVariables<I> {
    pub input: I,
}

impl<I> InputVariables<I> {
    pub fn new(input: I) -> Self {
        InputVariables { input }
    }
}

// ─── Documents ────────────────────────────────────────────────────────────────

pub const MOVE_PROJECT_CARD: MutationDocument = MutationDocument {
    operation: "moveProjectCard",
    replay: Replay::Safe,
    query: r#"
mutation($input: MoveProjectCardInput!) {
    moveProjectCard(input: $input) {
        cardEdge {
            node {
                id
            }
        }
    }
}
"#,
};

pub const ADD_COMMENT: MutationDocument = MutationDocument {
    operation: "addComment",
    replay: Replay::Unsafe,
    query: r#"
mutation($input: AddCommentInput!) {
    addComment(input: $input) {
        commentEdge {
            node {
                url
            }
        }
    }
}
"#,
};

pub const UPDATE_ISSUE: MutationDocument = MutationDocument {
    operation: "updateIssue",
    replay: Replay::Safe,
    query: r#"
mutation($input: UpdateIssueInput!) {
    updateIssue(input: $input) {
        issue {
            id
        }
    }
}
"#,
};

pub const CLOSE_PULL_REQUEST: MutationDocument = MutationDocument {
    operation: "closePullRequest",
    replay: Replay::Unsafe,
    query: r#"
mutation($input: ClosePullRequestInput!) {
    closePullRequest(input: $input) {
        pullRequest {
            id
        }
    }
}
"#,
};

pub const MERGE_PULL_REQUEST: MutationDocument = MutationDocument {
    operation: "mergePullRequest",
    replay: Replay::Unsafe,
    query: r#"
mutation($input: MergePullRequestInput!) {
    mergePullRequest(input: $input) {
        pullRequest {
            id
        }
    }
}
"#,
};

pub const CREATE_CHECK_RUN: MutationDocument = MutationDocument {
    operation: "createCheckRun",
    replay: Replay::Unsafe,
    query: r#"
mutation($input: CreateCheckRunInput!) {
    createCheckRun(input: $input) {
        checkRun {
            id
            url
        }
    }
}
"#,
};

pub const UPDATE_CHECK_RUN: MutationDocument = MutationDocument {
    operation: "updateCheckRun",
    replay: Replay::Safe,
    query: r#"
mutation($input: UpdateCheckRunInput!) {
    updateCheckRun(input: $input) {
        checkRun {
            id
        }
    }
}
"#,
};

pub const ADD_LABELS: MutationDocument = MutationDocument {
    operation: "addLabelsToLabelable",
    replay: Replay::Safe,
    query: r#"
mutation($input: AddLabelsToLabelableInput!) {
    addLabelsToLabelable(input: $input) {
        clientMutationId
    }
}
"#,
};

pub const REMOVE_LABELS: MutationDocument = MutationDocument {
    operation: "removeLabelsFromLabelable",
    replay: Replay::Safe,
    query: r#"
mutation($input: RemoveLabelsFromLabelableInput!) {
    removeLabelsFromLabelable(input: $input) {
        clientMutationId
    }
}
"#,
};

// ─── Inputs ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveProjectCardInput {
    pub card_id: NodeId,
    pub column_id: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentInput {
    pub subject_id: NodeId,
    pub body: String,
}

/// `milestone_id: None` serializes as `null`, which clears the milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIssueMilestoneInput {
    pub id: NodeId,
    pub milestone_id: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosePullRequestInput {
    pub pull_request_id: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergePullRequestInput {
    pub pull_request_id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_method: Option<MergeMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_body: Option<String>,
}

/// The `output` block shown on a check run's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRunOutput {
    pub title: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckRunInput {
    pub repository_id: NodeId,
    pub head_sha: Sha,
    pub name: String,
    pub status: CheckRunStatus,
    pub details_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<CheckConclusion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub output: CheckRunOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCheckRunInput {
    pub check_run_id: NodeId,
    pub repository_id: NodeId,
    pub status: CheckRunStatus,
    pub conclusion: CheckConclusion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details_url: Option<String>,
    pub output: CheckRunOutput,
}

/// Shared by add and remove; the platform uses the same shape for both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelsInput {
    pub labelable_id: NodeId,
    pub label_ids: Vec<NodeId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_document_names_its_operation() {
        for doc in [
            MOVE_PROJECT_CARD,
            ADD_COMMENT,
            UPDATE_ISSUE,
            CLOSE_PULL_REQUEST,
            MERGE_PULL_REQUEST,
            CREATE_CHECK_RUN,
            UPDATE_CHECK_RUN,
            ADD_LABELS,
            REMOVE_LABELS,
        ] {
            assert!(
                doc.query.contains(&format!("{}(input: $input)", doc.operation)),
                "{} document does not call {}",
                doc.operation,
                doc.operation
            );
        }
    }

    #[test]
    fn only_state_setting_documents_are_replay_safe() {
        let safe: Vec<_> = [
            MOVE_PROJECT_CARD,
            ADD_COMMENT,
            UPDATE_ISSUE,
            CLOSE_PULL_REQUEST,
            MERGE_PULL_REQUEST,
            CREATE_CHECK_RUN,
            UPDATE_CHECK_RUN,
            ADD_LABELS,
            REMOVE_LABELS,
        ]
        .into_iter()
        .filter(|doc| doc.replay == Replay::Safe)
        .map(|doc| doc.operation)
        .collect();
        assert_eq!(
            safe,
            vec![
                "moveProjectCard",
                "updateIssue",
                "updateCheckRun",
                "addLabelsToLabelable",
                "removeLabelsFromLabelable"
            ]
        );
    }

    #[test]
    fn merge_input_omits_absent_fields() {
        let input = MergePullRequestInput {
            pull_request_id: NodeId::new("PR_1"),
            merge_method: None,
            commit_headline: None,
            commit_body: None,
        };
        let value = serde_json::to_value(InputVariables::new(input)).unwrap();
        assert_eq!(value, json!({"input": {"pullRequestId": "PR_1"}}));
    }

    #[test]
    fn milestone_input_sends_explicit_null_to_clear() {
        let input = UpdateIssueMilestoneInput {
            id: NodeId::new("I_1"),
            milestone_id: None,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value, json!({"id": "I_1", "milestoneId": null}));
    }

    #[test]
    fn create_check_run_input_uses_platform_field_names() {
        let input = CreateCheckRunInput {
            repository_id: NodeId::new("R_1"),
            head_sha: Sha::new("a".repeat(40)),
            name: "lint".to_string(),
            status: CheckRunStatus::Queued,
            details_url: "https://ci.example/1".to_string(),
            conclusion: None,
            external_id: Some("job-1".to_string()),
            output: CheckRunOutput {
                title: "Lint".to_string(),
                summary: "Queued".to_string(),
                text: None,
            },
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(
            value,
            json!({
                "repositoryId": "R_1",
                "headSha": "a".repeat(40),
                "name": "lint",
                "status": "QUEUED",
                "detailsUrl": "https://ci.example/1",
                "externalId": "job-1",
                "output": {"title": "Lint", "summary": "Queued"}
            })
        );
    }
}
