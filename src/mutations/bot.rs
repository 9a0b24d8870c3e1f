//! The bot handle every catalog operation hangs off.

use super::selector::TransportSelector;

/// Identity and endpoint context for outbound calls.
///
/// Built once at startup and only ever read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotInfo {
    /// The bot's account login, for log lines.
    pub login: String,
    /// The platform host, e.g. `github.com`. REST calls go to `api.<host>`.
    pub host: String,
}

impl BotInfo {
    pub fn new(login: impl Into<String>, host: impl Into<String>) -> Self {
        BotInfo {
            login: login.into(),
            host: host.into(),
        }
    }

    /// Base URI for REST fallback requests.
    pub fn api_base(&self) -> String {
        format!("https://api.{}", self.host)
    }
}

/// A bot bound to a transport.
///
/// The transport is normally `OctocrabClient`; tests use a recording mock.
/// All operations take `&self`, so one `Bot` can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct Bot<T> {
    info: BotInfo,
    transport: T,
    selector: TransportSelector,
}

impl<T> Bot<T> {
    pub fn new(info: BotInfo, transport: T) -> Self {
        Bot {
            info,
            transport,
            selector: TransportSelector::default(),
        }
    }

    pub fn with_selector(mut self, selector: TransportSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn info(&self) -> &BotInfo {
        &self.info
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn selector(&self) -> &TransportSelector {
        &self.selector
    }
}
