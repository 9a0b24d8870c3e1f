//! Transport traits.
//!
//! The mutation layer only builds requests and classifies outcomes; these
//! traits are where requests leave the process. `OctocrabClient` implements
//! both against the real API, and tests substitute a recording transport.
//!
//! # Example (mock for testing)
//!
//! ```ignore
//! struct AlwaysFails;
//!
//! impl StructuredTransport for AlwaysFails {
//!     type Error = String;
//!
//!     async fn execute(&self, request: GraphQlRequest) -> Result<serde_json::Value, Self::Error> {
//!         Err(format!("{} unavailable", request.operation))
//!     }
//! }
//! ```

use std::fmt::Display;
use std::future::Future;

use super::graphql::GraphQlRequest;
use super::rest::LegacyRequest;

/// Executes GraphQL requests.
pub trait StructuredTransport {
    /// The error type returned by this transport.
    type Error: Display;

    /// Sends one request and returns the response's `data` object.
    ///
    /// A response carrying GraphQL `errors` is an `Err`, even if it also
    /// carries partial data.
    fn execute(
        &self,
        request: GraphQlRequest,
    ) -> impl Future<Output = Result<serde_json::Value, Self::Error>> + Send;
}

/// Executes REST fallback requests.
pub trait LegacyTransport {
    /// The error type returned by this transport.
    type Error: Display;

    /// Sends one request and returns the decoded JSON response body.
    fn send(
        &self,
        request: LegacyRequest,
    ) -> impl Future<Output = Result<serde_json::Value, Self::Error>> + Send;
}
