//! GitHub transports backed by octocrab.
//!
//! `OctocrabClient` implements both `StructuredTransport` (GraphQL) and
//! `LegacyTransport` (REST).
//!
//! Key features:
//! - Backoff retry that never resends a request which may already have been
//!   applied, unless the request is safe to apply twice
//! - Separates rate limits, server errors and permanent errors, including
//!   GraphQL error types
//! - A second header set for the classic projects preview API

mod client;
mod error;
mod retry;
mod transport;

pub use client::OctocrabClient;
pub use error::{TransportError, TransportErrorKind};
pub use retry::{RetryConfig, RetryPolicy, send_with_retry};
