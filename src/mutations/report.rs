//! One-line summaries of fire-and-report outcomes, for logs and chat replies.

use crate::policy::check_run::CheckRun;

use super::invoker::MutationResult;

pub fn report_comment(result: &MutationResult<String>) -> String {
    match result {
        Ok(url) => format!("Posted a new comment: {}", url),
        Err(e) => format!("Error while posting a comment: {}", e),
    }
}

pub fn report_check_run(result: &MutationResult<CheckRun>) -> String {
    match result {
        Ok(check_run) => format!("Created a new check run: {}", check_run.url()),
        Err(e) => format!("Error while creating a check run: {}", e),
    }
}
