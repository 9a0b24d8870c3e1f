//! Shared test utilities: a recording transport, log capture, and arbitrary
//! generators.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use proptest::prelude::*;
use serde_json::{Map, Value, json};

use crate::effects::{GraphQlRequest, LegacyRequest, LegacyTransport, StructuredTransport};
use crate::mutations::{Bot, BotInfo};
use crate::types::NodeId;

pub fn arb_node_id(prefix: &'static str) -> impl Strategy<Value = NodeId> {
    "[A-Za-z0-9]{4,12}".prop_map(move |s| NodeId::new(format!("{}_{}", prefix, s)))
}

pub fn test_bot(transport: RecordingTransport) -> Bot<RecordingTransport> {
    Bot::new(BotInfo::new("repo-steward", "github.com"), transport)
}

/// Formatted log lines emitted on this thread while the returned guard lives.
///
/// `#[tokio::test]` runs on a current-thread runtime, so everything the code
/// under test logs lands here.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn start() -> (Self, tracing::subscriber::DefaultGuard) {
        let logs = Self::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Index of the first line containing `needle`.
    pub fn position(&self, needle: &str) -> Option<usize> {
        self.lines().iter().position(|line| line.contains(needle))
    }

    /// The first line containing `needle`, or a panic listing what was logged.
    pub fn line_with(&self, needle: &str) -> String {
        let lines = self.lines();
        match lines.iter().find(|line| line.contains(needle)) {
            Some(line) => line.clone(),
            None => panic!("no log line contains {:?}; logged:\n{}", needle, lines.join("\n")),
        }
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Log {
    structured: Vec<GraphQlRequest>,
    legacy: Vec<LegacyRequest>,
    rejected: Vec<&'static str>,
    created_check_runs: HashSet<String>,
    next_id: u64,
    in_flight: usize,
    max_in_flight: usize,
    completed: usize,
}

/// A transport that records every request and answers like a well-behaved
/// platform, unless told otherwise per operation.
///
/// Check runs created through it get IDs `CR_<n>`; updating any other ID
/// fails the way GitHub does for unknown node IDs.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    canned: HashMap<&'static str, Result<Value, String>>,
    legacy_failure: Option<String>,
    delay: Option<Duration>,
    log: Mutex<Log>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `operation` with this `data` object.
    pub fn respond(mut self, operation: &'static str, data: Value) -> Self {
        self.canned.insert(operation, Ok(data));
        self
    }

    /// Fails `operation` with this transport error.
    pub fn fail(mut self, operation: &'static str, message: &str) -> Self {
        self.canned.insert(operation, Err(message.to_string()));
        self
    }

    /// Fails every REST request with this error.
    pub fn fail_legacy(mut self, message: &str) -> Self {
        self.legacy_failure = Some(message.to_string());
        self
    }

    /// Makes every GraphQL call take this long.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn structured_calls(&self) -> Vec<GraphQlRequest> {
        self.log.lock().unwrap().structured.clone()
    }

    pub fn legacy_calls(&self) -> Vec<LegacyRequest> {
        self.log.lock().unwrap().legacy.clone()
    }

    /// Operation names of GraphQL calls, in dispatch order.
    pub fn operations(&self) -> Vec<&'static str> {
        let log = self.log.lock().unwrap();
        log.structured.iter().map(|r| r.operation).collect()
    }

    /// Operation names of GraphQL calls that returned an error.
    pub fn rejected_operations(&self) -> Vec<&'static str> {
        self.log.lock().unwrap().rejected.clone()
    }

    /// The most GraphQL calls that were ever outstanding at once.
    pub fn max_in_flight(&self) -> usize {
        self.log.lock().unwrap().max_in_flight
    }

    /// GraphQL calls that have returned.
    pub fn completed(&self) -> usize {
        self.log.lock().unwrap().completed
    }

    fn answer(&self, request: &GraphQlRequest) -> Result<Value, String> {
        if let Some(canned) = self.canned.get(request.operation) {
            return canned.clone();
        }

        let input = &request.variables["input"];
        let mut log = self.log.lock().unwrap();
        let payload = match request.operation {
            "moveProjectCard" => json!({"cardEdge": {"node": {"id": input["cardId"]}}}),
            "addComment" => {
                log.next_id += 1;
                json!({"commentEdge": {"node": {"url": format!(
                    "https://github.com/octo/bot/issues/1#issuecomment-{}",
                    log.next_id
                )}}})
            }
            "updateIssue" => json!({"issue": {"id": input["id"]}}),
            "closePullRequest" | "mergePullRequest" => {
                json!({"pullRequest": {"id": input["pullRequestId"]}})
            }
            "createCheckRun" => {
                log.next_id += 1;
                let id = format!("CR_{}", log.next_id);
                log.created_check_runs.insert(id.clone());
                json!({"checkRun": {
                    "id": id,
                    "url": format!("https://github.com/octo/bot/runs/{}", log.next_id),
                }})
            }
            "updateCheckRun" => {
                let id = input["checkRunId"].as_str().unwrap_or_default();
                if !log.created_check_runs.contains(id) {
                    return Err(format!(
                        "Could not resolve to a node with the global id of '{}'",
                        id
                    ));
                }
                json!({"checkRun": {"id": id}})
            }
            "addLabelsToLabelable" | "removeLabelsFromLabelable" => {
                json!({"clientMutationId": null})
            }
            other => return Err(format!("unexpected mutation {}", other)),
        };

        let mut data = Map::new();
        data.insert(request.operation.to_string(), payload);
        Ok(Value::Object(data))
    }
}

impl StructuredTransport for RecordingTransport {
    type Error = String;

    fn execute(
        &self,
        request: GraphQlRequest,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send {
        async move {
            {
                let mut log = self.log.lock().unwrap();
                log.structured.push(request.clone());
                log.in_flight += 1;
                log.max_in_flight = log.max_in_flight.max(log.in_flight);
            }

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            let result = self.answer(&request);

            {
                let mut log = self.log.lock().unwrap();
                log.in_flight -= 1;
                log.completed += 1;
                if result.is_err() {
                    log.rejected.push(request.operation);
                }
            }
            result
        }
    }
}

impl LegacyTransport for RecordingTransport {
    type Error = String;

    fn send(
        &self,
        request: LegacyRequest,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send {
        async move {
            tracing::trace!(
                method = request.method.as_str(),
                uri = %request.uri,
                "Recorded REST request"
            );
            {
                self.log.lock().unwrap().legacy.push(request);
            }
            match &self.legacy_failure {
                Some(message) => Err(message.clone()),
                None => Ok(json!({})),
            }
        }
    }
}
