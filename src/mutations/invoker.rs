//! The call-and-classify routine behind every GraphQL mutation.
//!
//! `invoke` serializes the variables, makes exactly one transport call, decodes
//! the mutation's payload from the `data` object, and hands it to a shape check
//! supplied by the caller. Every failure along the way comes back as a
//! [`MutationError`]; nothing panics and nothing retries here. Retrying
//! transient failures is the transport's job.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::effects::{GraphQlRequest, MutationDocument, StructuredTransport};

/// Outcome of one remote mutation.
pub type MutationResult<T> = Result<T, MutationError>;

/// Why a mutation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The transport reported a failure (network, auth, rate limit, or GraphQL
    /// errors in the response).
    Transport,
    /// The call succeeded but the payload lacked a field the operation needs.
    IncompleteResponse,
    /// The request couldn't be built, so nothing was sent.
    InvalidRequest,
}

/// A classified mutation failure with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct MutationError {
    pub kind: FailureKind,
    pub message: String,
}

impl MutationError {
    pub fn transport(message: impl Into<String>) -> Self {
        MutationError {
            kind: FailureKind::Transport,
            message: message.into(),
        }
    }

    pub fn incomplete(message: impl Into<String>) -> Self {
        MutationError {
            kind: FailureKind::IncompleteResponse,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        MutationError {
            kind: FailureKind::InvalidRequest,
            message: message.into(),
        }
    }
}

/// Runs one GraphQL mutation.
///
/// `P` is the mutation's payload type, decoded from `data[document.operation]`.
/// `shape` pulls the value the caller needs out of it; returning `None` means
/// the payload was structurally incomplete, and `what` names the missing part
/// in the resulting error message.
pub async fn invoke<T, V, P, R, F>(
    transport: &T,
    document: &MutationDocument,
    variables: &V,
    what: &str,
    shape: F,
) -> MutationResult<R>
where
    T: StructuredTransport,
    V: Serialize,
    P: DeserializeOwned,
    F: FnOnce(P) -> Option<R>,
{
    let variables = serde_json::to_value(variables).map_err(|e| {
        MutationError::invalid_request(format!(
            "Could not encode variables for {}: {}",
            document.operation, e
        ))
    })?;

    let request = GraphQlRequest {
        operation: document.operation,
        replay: document.replay,
        query: document.query,
        variables,
    };

    tracing::debug!(operation = document.operation, "Dispatching mutation");

    let mut data = transport
        .execute(request)
        .await
        .map_err(|e| MutationError::transport(e.to_string()))?;

    let payload = match data.get_mut(document.operation).map(serde_json::Value::take) {
        Some(serde_json::Value::Null) | None => {
            return Err(MutationError::incomplete(format!(
                "{} response has no {} payload",
                document.operation, document.operation
            )));
        }
        Some(payload) => payload,
    };

    let payload: P = serde_json::from_value(payload).map_err(|e| {
        MutationError::incomplete(format!(
            "{} response is malformed: {}",
            document.operation, e
        ))
    })?;

    shape(payload).ok_or_else(|| {
        MutationError::incomplete(format!(
            "{} response is missing {}",
            document.operation, what
        ))
    })
}
