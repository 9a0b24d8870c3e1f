//! Remote calls as data.
//!
//! GraphQL mutations and REST fallback requests are plain values built from
//! typed inputs. Nothing here performs I/O; the transport traits describe
//! what executes them.

pub mod graphql;
pub mod rest;
pub mod transport;

/// Whether a request may be sent again after a failure that might have been
/// applied (a 5xx or a dropped connection).
///
/// `Safe` requests set state, so a second copy changes nothing. `Unsafe`
/// requests create something or make a one-way transition: a second copy
/// duplicates the comment or check run, or fails with "already merged".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Replay {
    Safe,
    Unsafe,
}

pub use graphql::{GraphQlRequest, InputVariables, MutationDocument};
pub use rest::{HeaderSet, HttpMethod, LegacyRequest, PROJECTS_PREVIEW_ACCEPT};
pub use transport::{LegacyTransport, StructuredTransport};
