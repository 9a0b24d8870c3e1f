//! Repo Steward - the mutation layer of a repository-management bot.
//!
//! This library turns typed intents (move a card, merge a pull request, complete
//! a check run) into GitHub GraphQL mutations or REST fallback requests,
//! dispatches them, and classifies the outcome. Two small policies compose
//! mutations into decisions: the check run lifecycle and milestone
//! reconciliation for issues closed by pull requests.

pub mod config;
pub mod effects;
pub mod github;
pub mod mutations;
pub mod policy;
pub mod types;

#[cfg(test)]
mod test_utils;
