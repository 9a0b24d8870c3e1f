//! Octocrab client wrapper bound to one GitHub host.
//!
//! `OctocrabClient` holds two `Octocrab` instances sharing a token: one with
//! the standard headers and one that also sends the classic projects preview
//! `Accept` header. Requests pick between them by [`HeaderSet`].

use octocrab::Octocrab;

use crate::effects::HeaderSet;

use super::retry::{RetryConfig, RetryPolicy};

/// The preview name behind `PROJECTS_PREVIEW_ACCEPT`.
const PROJECTS_PREVIEW: &str = "inertia";

/// A GitHub API client for one host.
#[derive(Clone)]
pub struct OctocrabClient {
    client: Octocrab,

    /// Same credentials, plus the projects preview header.
    preview: Octocrab,

    retry_config: RetryConfig,
    retry_policy: RetryPolicy,
}

impl OctocrabClient {
    /// Creates a client from pre-configured Octocrab instances.
    ///
    /// Use this when you need custom authentication (e.g., GitHub App
    /// installation tokens). `preview` must carry the projects preview.
    pub fn new(client: Octocrab, preview: Octocrab) -> Self {
        Self {
            client,
            preview,
            retry_config: RetryConfig::DEFAULT,
            retry_policy: RetryPolicy::ByReplay,
        }
    }

    /// Creates a client from a personal access or installation token.
    ///
    /// `host` is the platform host, e.g. `github.com`; requests go to
    /// `https://api.<host>`.
    pub fn from_token(token: impl Into<String>, host: &str) -> Result<Self, octocrab::Error> {
        let token = token.into();
        let base_uri = format!("https://api.{}", host);

        let client = Octocrab::builder()
            .base_uri(base_uri.as_str())?
            .personal_token(token.clone())
            .build()?;
        let preview = Octocrab::builder()
            .base_uri(base_uri.as_str())?
            .personal_token(token)
            .add_preview(PROJECTS_PREVIEW)
            .build()?;

        Ok(Self::new(client, preview))
    }

    pub fn with_retry(mut self, config: RetryConfig, policy: RetryPolicy) -> Self {
        self.retry_config = config;
        self.retry_policy = policy;
        self
    }

    /// Returns the underlying octocrab client with standard headers.
    pub fn inner(&self) -> &Octocrab {
        &self.client
    }

    /// Returns the octocrab client carrying the given header set.
    pub fn for_headers(&self, headers: HeaderSet) -> &Octocrab {
        match headers {
            HeaderSet::Standard => &self.client,
            HeaderSet::ProjectsPreview => &self.preview,
        }
    }

    pub fn retry_config(&self) -> RetryConfig {
        self.retry_config
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }
}

impl std::fmt::Debug for OctocrabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctocrabClient")
            .field("retry_config", &self.retry_config)
            .field("retry_policy", &self.retry_policy)
            .finish_non_exhaustive()
    }
}
