//! The transport traits implemented against the GitHub API with octocrab.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::value::RawValue;

use crate::effects::{GraphQlRequest, HttpMethod, LegacyRequest, LegacyTransport, StructuredTransport};

use super::client::OctocrabClient;
use super::error::{TransportError, TransportErrorKind};
use super::retry::send_with_retry;

impl StructuredTransport for OctocrabClient {
    type Error = TransportError;

    async fn execute(&self, request: GraphQlRequest) -> Result<Value, Self::Error> {
        send_with_retry(
            self.retry_config(),
            self.retry_policy(),
            request.operation,
            request.replay,
            || execute_once(self, &request),
        )
        .await
    }
}

impl LegacyTransport for OctocrabClient {
    type Error = TransportError;

    async fn send(&self, request: LegacyRequest) -> Result<Value, Self::Error> {
        let operation = format!("{} {}", request.method.as_str(), request.uri);
        send_with_retry(
            self.retry_config(),
            self.retry_policy(),
            &operation,
            request.replay(),
            || send_once(self, &request),
        )
        .await
    }
}

// ─── GraphQL ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GraphQlPayload<'a> {
    query: &'a str,
    variables: &'a Value,
}

/// The top level of a GraphQL response body.
#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
    /// GitHub's error classification, e.g. `NOT_FOUND` or `RATE_LIMITED`.
    #[serde(rename = "type")]
    error_type: Option<String>,
}

async fn execute_once(
    client: &OctocrabClient,
    request: &GraphQlRequest,
) -> Result<Value, TransportError> {
    let payload = GraphQlPayload {
        query: request.query,
        variables: &request.variables,
    };

    let result: Result<GraphQlEnvelope, _> = client.inner().graphql(&payload).await;

    match result {
        Ok(envelope) => decode_envelope(request.operation, envelope),
        Err(e) => Err(TransportError::from_octocrab(e)),
    }
}

/// Turns a GraphQL response into its `data` object or an error.
///
/// Any entry in `errors` fails the call, even alongside partial data. A
/// `RATE_LIMITED` entry means GitHub refused the whole document, so the call
/// may be sent again whatever its replay safety.
fn decode_envelope(operation: &str, envelope: GraphQlEnvelope) -> Result<Value, TransportError> {
    if !envelope.errors.is_empty() {
        let rate_limited = envelope
            .errors
            .iter()
            .any(|e| e.error_type.as_deref() == Some("RATE_LIMITED"));
        let message = envelope
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        let kind = if rate_limited {
            TransportErrorKind::RateLimited
        } else {
            TransportErrorKind::Permanent
        };
        return Err(TransportError::without_source(kind, None, message));
    }

    match envelope.data {
        Some(Value::Null) | None => Err(TransportError::permanent_without_source(format!(
            "{} response has neither data nor errors",
            operation
        ))),
        Some(data) => Ok(data),
    }
}

// ─── REST ─────────────────────────────────────────────────────────────────────

async fn send_once(
    client: &OctocrabClient,
    request: &LegacyRequest,
) -> Result<Value, TransportError> {
    let body = RawValue::from_string(request.body.clone()).map_err(|e| {
        TransportError::permanent_without_source(format!("Request body is not JSON: {}", e))
    })?;
    let octocrab = client.for_headers(request.headers);

    let result: Result<Value, octocrab::Error> = match request.method {
        HttpMethod::Patch => octocrab.patch(&request.uri, Some(&body)).await,
        HttpMethod::Post => octocrab.post(&request.uri, Some(&body)).await,
    };

    result.map_err(TransportError::from_octocrab)
}
