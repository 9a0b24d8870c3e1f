//! The mutation catalog and its dispatch machinery.
//!
//! Every write the bot makes to the platform goes through a [`Bot`]. Each
//! operation builds its request, makes exactly one transport call, and
//! classifies the outcome into a [`MutationResult`].

pub mod bot;
pub mod catalog;
pub mod invoker;
pub mod report;
pub mod responses;
pub mod selector;

pub use bot::{Bot, BotInfo};
pub use catalog::MergeOptions;
pub use invoker::{FailureKind, MutationError, MutationResult, invoke};
pub use report::{report_check_run, report_comment};
pub use selector::{ApiCoverage, Operation, Transport, TransportSelector};
