//! REST requests for operations the GraphQL API doesn't cover.
//!
//! Bodies are serialized once, here, and sent byte-for-byte by the transport.
//! Field order in the body structs is the order on the wire.

use serde::Serialize;

use super::Replay;
use crate::types::{ColumnId, CommitState, ContentId, IssueRef, RepoId, Sha};

/// Accept header the classic projects API required while it was in preview.
pub const PROJECTS_PREVIEW_ACCEPT: &str = "application/vnd.github.inertia-preview+json";

/// HTTP verbs the fallback uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Patch,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Patch => "PATCH",
            HttpMethod::Post => "POST",
        }
    }
}

/// Which set of headers a request needs on top of authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderSet {
    /// Authentication only.
    Standard,
    /// Authentication plus the projects preview `Accept` header.
    ProjectsPreview,
}

/// A fully-built REST request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRequest {
    pub method: HttpMethod,
    pub uri: String,
    pub headers: HeaderSet,
    /// JSON body, already serialized.
    pub body: String,
}

#[derive(Serialize)]
struct MilestoneBody {
    milestone: Option<u64>,
}

#[derive(Serialize)]
struct StatusBody<'a> {
    state: CommitState,
    target_url: &'a str,
    description: &'a str,
    context: &'a str,
}

#[derive(Serialize)]
struct ColumnCardBody {
    content_id: u64,
    content_type: &'static str,
}

impl LegacyRequest {
    /// `PATCH` sets fields and is safe to repeat. `POST` creates a status or a
    /// card each time.
    pub fn replay(&self) -> Replay {
        match self.method {
            HttpMethod::Patch => Replay::Safe,
            HttpMethod::Post => Replay::Unsafe,
        }
    }

    /// Sets (or with `None`, removes) an issue's milestone by milestone number.
    pub fn issue_milestone(
        api_base: &str,
        issue: &IssueRef,
        milestone: Option<u64>,
    ) -> Result<Self, serde_json::Error> {
        Ok(LegacyRequest {
            method: HttpMethod::Patch,
            uri: format!(
                "{}/repos/{}/{}/issues/{}",
                api_base, issue.repo.owner, issue.repo.repo, issue.number
            ),
            headers: HeaderSet::Standard,
            body: serde_json::to_string(&MilestoneBody { milestone })?,
        })
    }

    /// Creates a commit status.
    pub fn commit_status(
        api_base: &str,
        repo: &RepoId,
        commit: &Sha,
        state: CommitState,
        target_url: &str,
        context: &str,
        description: &str,
    ) -> Result<Self, serde_json::Error> {
        let body = StatusBody {
            state,
            target_url,
            description,
            context,
        };
        Ok(LegacyRequest {
            method: HttpMethod::Post,
            uri: format!(
                "{}/repos/{}/statuses/{}",
                api_base,
                repo.full_name(),
                commit
            ),
            headers: HeaderSet::Standard,
            body: serde_json::to_string(&body)?,
        })
    }

    /// Adds a pull request to a project column as a card.
    pub fn column_card(
        api_base: &str,
        column: ColumnId,
        item: ContentId,
    ) -> Result<Self, serde_json::Error> {
        let body = ColumnCardBody {
            content_id: item.0,
            content_type: "PullRequest",
        };
        Ok(LegacyRequest {
            method: HttpMethod::Post,
            uri: format!("{}/projects/columns/{}/cards", api_base, column),
            headers: HeaderSet::ProjectsPreview,
            body: serde_json::to_string(&body)?,
        })
    }
}
