//! The mutation catalog.
//!
//! Two calling conventions live side by side:
//!
//! - **Fire-and-log** operations (move card, update milestone, close and merge
//!   pull request, update check run, and the REST fallbacks) log a failure
//!   and return `()`. The caller can't act on those failures anyway.
//! - **Fire-and-report** operations (post comment, create check run) return a
//!   [`MutationResult`] because the caller needs the success value.
//!
//! Label changes are the exception to both: their outcome is discarded
//! without a log line.

use crate::effects::graphql::{
    ADD_COMMENT, ADD_LABELS, AddCommentInput, CLOSE_PULL_REQUEST, CREATE_CHECK_RUN,
    ClosePullRequestInput, InputVariables, LabelsInput, MERGE_PULL_REQUEST, MOVE_PROJECT_CARD,
    MergePullRequestInput, MoveProjectCardInput, REMOVE_LABELS, UPDATE_CHECK_RUN, UPDATE_ISSUE,
    UpdateIssueMilestoneInput,
};
use crate::effects::{LegacyRequest, LegacyTransport, MutationDocument, StructuredTransport};
use crate::policy::check_run::{CheckRun, CheckRunCompletion, NewCheckRun};
use crate::types::{
    ColumnId, CommitState, ContentId, IssueAddress, IssueRef, MergeMethod, MilestoneRef, NodeId,
    RepoId, Sha,
};

use super::bot::Bot;
use super::invoker::{MutationError, MutationResult, invoke};
use super::responses::{
    AddCommentPayload, CheckRunPayload, LabelsPayload, MoveProjectCardPayload,
    PullRequestPayload, UpdateIssuePayload,
};
use super::selector::{Operation, Transport};

/// Optional parts of a merge. `Default` lets the repository's default method
/// and GitHub's default commit message apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOptions {
    pub method: Option<MergeMethod>,
    pub commit_headline: Option<String>,
    pub commit_body: Option<String>,
}

impl MergeOptions {
    pub fn with_method(method: MergeMethod) -> Self {
        MergeOptions {
            method: Some(method),
            ..MergeOptions::default()
        }
    }

    pub fn commit_message(mut self, headline: impl Into<String>, body: impl Into<String>) -> Self {
        self.commit_headline = Some(headline.into());
        self.commit_body = Some(body.into());
        self
    }
}

/// Logs the outcome of a fire-and-log operation.
fn log_outcome<R>(operation: Operation, result: MutationResult<R>) {
    match result {
        Ok(_) => tracing::debug!(operation = operation.name(), "Mutation succeeded"),
        Err(e) => tracing::error!(
            operation = operation.name(),
            kind = ?e.kind,
            error = %e,
            "Mutation failed"
        ),
    }
}

// ─── GraphQL Operations ───────────────────────────────────────────────────────

impl<T: StructuredTransport> Bot<T> {
    /// Moves a project board card into another column.
    pub async fn move_card_to_column(&self, card: &NodeId, column: &NodeId) {
        let variables = InputVariables::new(MoveProjectCardInput {
            card_id: card.clone(),
            column_id: column.clone(),
        });
        let result = invoke(
            self.transport(),
            &MOVE_PROJECT_CARD,
            &variables,
            "the moved card",
            MoveProjectCardPayload::card_id,
        )
        .await;
        log_outcome(Operation::MoveCard, result);
    }

    /// Comments on an issue or pull request, returning the comment's URL.
    pub async fn post_comment(
        &self,
        target: &NodeId,
        message: impl Into<String>,
    ) -> MutationResult<String> {
        let variables = InputVariables::new(AddCommentInput {
            subject_id: target.clone(),
            body: message.into(),
        });
        invoke(
            self.transport(),
            &ADD_COMMENT,
            &variables,
            "the comment URL",
            AddCommentPayload::url,
        )
        .await
    }

    /// Sets an issue's milestone.
    pub async fn update_milestone(&self, issue: &NodeId, milestone: &NodeId) {
        let result = self.update_issue_milestone(issue, Some(milestone)).await;
        log_outcome(Operation::UpdateMilestone, result);
    }

    async fn update_issue_milestone(
        &self,
        issue: &NodeId,
        milestone: Option<&NodeId>,
    ) -> MutationResult<NodeId> {
        let variables = InputVariables::new(UpdateIssueMilestoneInput {
            id: issue.clone(),
            milestone_id: milestone.cloned(),
        });
        invoke(
            self.transport(),
            &UPDATE_ISSUE,
            &variables,
            "the updated issue",
            UpdateIssuePayload::issue_id,
        )
        .await
    }

    /// Closes a pull request without merging it.
    pub async fn close_pull_request(&self, pull_request: &NodeId) {
        let variables = InputVariables::new(ClosePullRequestInput {
            pull_request_id: pull_request.clone(),
        });
        let result = invoke(
            self.transport(),
            &CLOSE_PULL_REQUEST,
            &variables,
            "the closed pull request",
            PullRequestPayload::pull_request_id,
        )
        .await;
        log_outcome(Operation::ClosePullRequest, result);
    }

    /// Merges a pull request.
    ///
    /// Options left as `None` are omitted from the request, not sent as null.
    pub async fn merge_pull_request(&self, pull_request: &NodeId, options: MergeOptions) {
        let variables = InputVariables::new(MergePullRequestInput {
            pull_request_id: pull_request.clone(),
            merge_method: options.method,
            commit_headline: options.commit_headline,
            commit_body: options.commit_body,
        });
        let result = invoke(
            self.transport(),
            &MERGE_PULL_REQUEST,
            &variables,
            "the merged pull request",
            PullRequestPayload::pull_request_id,
        )
        .await;
        log_outcome(Operation::MergePullRequest, result);
    }

    /// Creates a check run and returns the handle needed to complete it.
    ///
    /// A success response without both the check run's ID and URL is a failure.
    pub async fn create_check_run(&self, check_run: NewCheckRun) -> MutationResult<CheckRun> {
        let input = check_run.into_input()?;
        let repository = input.repository_id.clone();
        let variables = InputVariables::new(input);
        invoke(
            self.transport(),
            &CREATE_CHECK_RUN,
            &variables,
            "the created check run",
            |payload: CheckRunPayload| {
                let fields = payload.check_run()?;
                Some(CheckRun::new(fields.id?, fields.url?, repository))
            },
        )
        .await
    }

    /// Creates a check run that is already in progress.
    pub async fn start_check_run(&self, check_run: NewCheckRun) -> MutationResult<CheckRun> {
        self.create_check_run(check_run.in_progress()).await
    }

    /// Completes a check run created by [`create_check_run`](Self::create_check_run).
    pub async fn update_check_run(&self, check_run: &CheckRun, completion: CheckRunCompletion) {
        let variables = InputVariables::new(completion.into_input(check_run));
        let result = invoke(
            self.transport(),
            &UPDATE_CHECK_RUN,
            &variables,
            "the updated check run",
            CheckRunPayload::check_run_id,
        )
        .await;
        log_outcome(Operation::UpdateCheckRun, result);
    }

    /// Adds labels to an issue or pull request.
    ///
    /// The outcome is discarded, including failures, and nothing is logged.
    pub async fn add_labels(&self, labelable: &NodeId, labels: &[NodeId]) {
        let _ = self.change_labels(&ADD_LABELS, labelable, labels).await;
    }

    /// Removes labels from an issue or pull request.
    ///
    /// The outcome is discarded, including failures, and nothing is logged.
    pub async fn remove_labels(&self, labelable: &NodeId, labels: &[NodeId]) {
        let _ = self.change_labels(&REMOVE_LABELS, labelable, labels).await;
    }

    async fn change_labels(
        &self,
        document: &MutationDocument,
        labelable: &NodeId,
        labels: &[NodeId],
    ) -> MutationResult<()> {
        let variables = InputVariables::new(LabelsInput {
            labelable_id: labelable.clone(),
            label_ids: labels.to_vec(),
        });
        invoke(
            self.transport(),
            document,
            &variables,
            "the label payload",
            |_: LabelsPayload| Some(()),
        )
        .await
    }
}

// ─── REST Fallback Operations ─────────────────────────────────────────────────

impl<T: LegacyTransport> Bot<T> {
    async fn send_legacy(
        &self,
        operation: Operation,
        request: Result<LegacyRequest, serde_json::Error>,
    ) -> MutationResult<serde_json::Value> {
        let request = request.map_err(|e| {
            MutationError::invalid_request(format!("Could not encode {} body: {}", operation, e))
        })?;
        tracing::debug!(
            operation = operation.name(),
            method = request.method.as_str(),
            uri = %request.uri,
            "Sending REST request"
        );
        self.transport()
            .send(request)
            .await
            .map_err(|e| MutationError::transport(e.to_string()))
    }

    /// Sets an issue's milestone by number through REST. `None` removes it.
    pub async fn update_milestone_legacy(&self, issue: &IssueRef, milestone: Option<u64>) {
        let request = LegacyRequest::issue_milestone(&self.info().api_base(), issue, milestone);
        let result = self.send_legacy(Operation::UpdateMilestone, request).await;
        log_outcome(Operation::UpdateMilestone, result);
    }

    /// Removes an issue's milestone through REST.
    pub async fn remove_milestone_legacy(&self, issue: &IssueRef) {
        self.update_milestone_legacy(issue, None).await;
    }

    /// Posts a commit status.
    pub async fn send_status_check(
        &self,
        repo: &RepoId,
        commit: &Sha,
        state: CommitState,
        target_url: &str,
        context: &str,
        description: &str,
    ) {
        tracing::info!(
            repo = %repo,
            commit = commit.short(),
            state = state.as_api_str(),
            context,
            "Sending status check"
        );
        let request = LegacyRequest::commit_status(
            &self.info().api_base(),
            repo,
            commit,
            state,
            target_url,
            context,
            description,
        );
        let result = self.send_legacy(Operation::SendStatusCheck, request).await;
        log_outcome(Operation::SendStatusCheck, result);
    }

    /// Adds a pull request to a classic project board column.
    pub async fn add_item_to_column(&self, item: ContentId, column: ColumnId) {
        let request = LegacyRequest::column_card(&self.info().api_base(), column, item);
        let result = self.send_legacy(Operation::AddItemToColumn, request).await;
        log_outcome(Operation::AddItemToColumn, result);
    }
}

// ─── Transport-selected Operations ────────────────────────────────────────────

impl<T: StructuredTransport + LegacyTransport> Bot<T> {
    /// Sets an issue's milestone over whichever transport the platform supports.
    pub async fn set_milestone(&self, issue: &IssueAddress, milestone: &MilestoneRef) {
        match self.selector().transport_for(Operation::UpdateMilestone) {
            Transport::Structured => self.update_milestone(&issue.id, &milestone.id).await,
            Transport::Legacy => {
                self.update_milestone_legacy(&issue.rest, Some(milestone.number))
                    .await
            }
        }
    }

    /// Clears an issue's milestone over whichever transport the platform supports.
    pub async fn clear_milestone(&self, issue: &IssueAddress) {
        match self.selector().transport_for(Operation::UpdateMilestone) {
            Transport::Structured => {
                let result = self.update_issue_milestone(&issue.id, None).await;
                log_outcome(Operation::UpdateMilestone, result);
            }
            Transport::Legacy => self.remove_milestone_legacy(&issue.rest).await,
        }
    }
}
