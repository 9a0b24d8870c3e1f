//! Response payloads for each mutation.
//!
//! Every nested field is optional: GitHub returns `null` for parts of a payload
//! it couldn't resolve, and the invoker reports that as an incomplete response
//! instead of failing deserialization.

use serde::Deserialize;

use crate::types::NodeId;

#[derive(Debug, Deserialize)]
struct Node<T> {
    node: Option<T>,
}

#[derive(Debug, Deserialize)]
struct IdOnly {
    id: Option<NodeId>,
}

#[derive(Debug, Deserialize)]
struct UrlOnly {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveProjectCardPayload {
    card_edge: Option<Node<IdOnly>>,
}

impl MoveProjectCardPayload {
    /// The moved card's ID.
    pub fn card_id(self) -> Option<NodeId> {
        self.card_edge?.node?.id
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentPayload {
    comment_edge: Option<Node<UrlOnly>>,
}

impl AddCommentPayload {
    /// The new comment's URL.
    pub fn url(self) -> Option<String> {
        self.comment_edge?.node?.url
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateIssuePayload {
    issue: Option<IdOnly>,
}

impl UpdateIssuePayload {
    pub fn issue_id(self) -> Option<NodeId> {
        self.issue?.id
    }
}

/// Shared by close and merge.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestPayload {
    pull_request: Option<IdOnly>,
}

impl PullRequestPayload {
    pub fn pull_request_id(self) -> Option<NodeId> {
        self.pull_request?.id
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckRunFields {
    pub id: Option<NodeId>,
    pub url: Option<String>,
}

/// Shared by create and update; update only asks for the ID.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRunPayload {
    check_run: Option<CheckRunFields>,
}

impl CheckRunPayload {
    pub fn check_run(self) -> Option<CheckRunFields> {
        self.check_run
    }

    pub fn check_run_id(self) -> Option<NodeId> {
        self.check_run?.id
    }
}

/// Label mutations only ask for `clientMutationId`, which is usually null.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelsPayload {
    #[allow(dead_code)]
    client_mutation_id: Option<String>,
}
