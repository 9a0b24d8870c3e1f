//! Policies that compose several mutations into one decision.

pub mod check_run;
pub mod milestone;

pub use check_run::{CheckRun, CheckRunCompletion, NewCheckRun};
pub use milestone::{MilestoneDecision, decide_milestone, reconcile_milestone};
