//! Transport error types.
//!
//! Errors are split three ways, by what a retry could do:
//!
//! - **RateLimited**: the platform refused the request without applying it
//!   (429, a 403 rate limit message, GraphQL `RATE_LIMITED`). Any request
//!   may be sent again.
//! - **Transient**: the request may or may not have been applied (5xx,
//!   timeouts, dropped connections). Only [`Replay::Safe`] requests are sent
//!   again.
//! - **Permanent**: retrying won't help (most 4xx, unknown node IDs,
//!   insufficient scopes, schema errors).
//!
//! The mutation layer never sees the distinction. It only sees the message,
//! as a `FailureKind::Transport` failure.

use std::fmt;
use thiserror::Error;

use crate::effects::Replay;

/// The kind of transport error, categorized for retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    RateLimited,
    Transient,
    Permanent,
}

impl TransportErrorKind {
    /// Whether a request with this replay safety may be sent again after
    /// failing this way.
    pub fn allows_retry(&self, replay: Replay) -> bool {
        match self {
            TransportErrorKind::RateLimited => true,
            TransportErrorKind::Transient => replay == Replay::Safe,
            TransportErrorKind::Permanent => false,
        }
    }
}

/// A failed GraphQL or REST call.
#[derive(Debug, Error)]
pub struct TransportError {
    pub kind: TransportErrorKind,

    /// The HTTP status code, if available.
    pub status_code: Option<u16>,

    /// A human-readable description of the error.
    pub message: String,

    /// The underlying octocrab error, if available.
    #[source]
    pub source: Option<octocrab::Error>,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "GitHub API error (HTTP {}): {}", code, self.message),
            None => write!(f, "GitHub API error: {}", self.message),
        }
    }
}

impl TransportError {
    pub fn permanent_without_source(message: impl Into<String>) -> Self {
        Self::without_source(TransportErrorKind::Permanent, None, message)
    }

    /// An error with no octocrab source, e.g. one decoded from a GraphQL body.
    pub fn without_source(
        kind: TransportErrorKind,
        status_code: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            status_code,
            message: message.into(),
            source: None,
        }
    }

    /// Categorizes an octocrab error by status code and message.
    pub fn from_octocrab(err: octocrab::Error) -> Self {
        let status_code = extract_status_code(&err);
        let message = err.to_string();
        Self {
            kind: classify(status_code, &message),
            status_code,
            message,
            source: Some(err),
        }
    }
}

fn classify(status_code: Option<u16>, message: &str) -> TransportErrorKind {
    match status_code {
        Some(429) => TransportErrorKind::RateLimited,
        Some(403) if is_rate_limit_error(message) => TransportErrorKind::RateLimited,
        Some(code) if (500..600).contains(&code) => TransportErrorKind::Transient,
        _ if is_transient_message(message) => TransportErrorKind::Transient,
        Some(_) => TransportErrorKind::Permanent,
        None if is_network_error(message) => TransportErrorKind::Transient,
        None => TransportErrorKind::Permanent,
    }
}

/// Extracts the HTTP status code from an octocrab error, if present.
///
/// octocrab doesn't expose the status code for every error variant, so this
/// reads it back out of the rendered message. `None` leads to conservative
/// (permanent) categorization.
fn extract_status_code(err: &octocrab::Error) -> Option<u16> {
    if let octocrab::Error::GitHub { source, .. } = err {
        return Some(source.status_code.as_u16());
    }
    status_code_from_message(&err.to_string())
}

fn status_code_from_message(err_str: &str) -> Option<u16> {
    if let Some(idx) = err_str.find("status: ") {
        let rest = &err_str[idx + 8..];
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if let Ok(code) = rest[..end].parse() {
            return Some(code);
        }
    }

    if err_str.contains("404") && err_str.to_lowercase().contains("not found") {
        return Some(404);
    }
    [422, 403, 401, 429, 500, 502, 503]
        .into_iter()
        .find(|code| err_str.contains(&code.to_string()))
}

/// Messages GitHub uses for conditions that clear up on retry.
fn is_transient_message(message: &str) -> bool {
    let message_lower = message.to_lowercase();
    message_lower.contains("try again") || message_lower.contains("something went wrong")
}

fn is_rate_limit_error(message: &str) -> bool {
    let message_lower = message.to_lowercase();
    message_lower.contains("rate limit")
        || message_lower.contains("api rate")
        || message_lower.contains("secondary rate")
        || message_lower.contains("abuse detection")
}

fn is_network_error(message: &str) -> bool {
    let message_lower = message.to_lowercase();
    message_lower.contains("timeout")
        || message_lower.contains("connection")
        || message_lower.contains("network")
        || message_lower.contains("dns")
        || message_lower.contains("timed out")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_message_detection() {
        assert!(is_transient_message("Please try again later"));
        assert!(is_transient_message(
            "Something went wrong while executing your query."
        ));
        assert!(!is_transient_message(
            "Could not resolve to a node with the global id of 'X'"
        ));
    }

    #[test]
    fn rate_limit_detection() {
        assert!(is_rate_limit_error("API rate limit exceeded"));
        assert!(is_rate_limit_error("secondary rate limit"));
        assert!(is_rate_limit_error("abuse detection mechanism"));
        assert!(!is_rate_limit_error("Permission denied"));
    }

    #[test]
    fn network_error_detection() {
        assert!(is_network_error("connection timeout"));
        assert!(is_network_error("DNS resolution failed"));
        assert!(is_network_error("request timed out"));
        assert!(!is_network_error("Not found"));
    }

    #[test]
    fn status_code_parsing() {
        assert_eq!(status_code_from_message("HTTP status: 502 Bad Gateway"), Some(502));
        assert_eq!(status_code_from_message("404 Not Found"), Some(404));
        assert_eq!(status_code_from_message("Validation Failed 422"), Some(422));
        assert_eq!(status_code_from_message("broken pipe"), None);
    }

    #[test]
    fn display_includes_status() {
        let mut err = TransportError::permanent_without_source("Not Found");
        assert_eq!(err.to_string(), "GitHub API error: Not Found");
        err.status_code = Some(404);
        assert_eq!(err.to_string(), "GitHub API error (HTTP 404): Not Found");
    }

    #[test]
    fn rate_limits_are_separate_from_server_errors() {
        assert_eq!(classify(Some(429), "Too Many Requests"), TransportErrorKind::RateLimited);
        assert_eq!(
            classify(Some(403), "API rate limit exceeded for installation"),
            TransportErrorKind::RateLimited
        );
        assert_eq!(classify(Some(403), "Resource not accessible"), TransportErrorKind::Permanent);
        assert_eq!(classify(Some(502), "Bad Gateway"), TransportErrorKind::Transient);
        assert_eq!(classify(None, "operation timed out"), TransportErrorKind::Transient);
        assert_eq!(classify(Some(422), "Validation Failed"), TransportErrorKind::Permanent);
    }

    #[test]
    fn only_unapplied_failures_allow_unsafe_retry() {
        use TransportErrorKind::*;
        assert!(RateLimited.allows_retry(Replay::Unsafe));
        assert!(RateLimited.allows_retry(Replay::Safe));
        assert!(!Transient.allows_retry(Replay::Unsafe));
        assert!(Transient.allows_retry(Replay::Safe));
        assert!(!Permanent.allows_retry(Replay::Safe));
    }
}
