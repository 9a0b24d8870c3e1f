//! Process configuration.
//!
//! Read once at startup from the environment:
//!
//! | Variable                | Default        | Meaning                              |
//! |-------------------------|----------------|--------------------------------------|
//! | `GITHUB_TOKEN`          | (required)     | Token used for every call            |
//! | `GITHUB_HOST`           | `github.com`   | Platform host; API is `api.<host>`   |
//! | `BOT_LOGIN`             | `repo-steward` | The bot's account login              |
//! | `BOT_LEGACY_MILESTONES` | unset          | `1`/`true` sets milestones over REST |

use thiserror::Error;

use crate::github::{OctocrabClient, RetryConfig, RetryPolicy};
use crate::mutations::{ApiCoverage, Bot, BotInfo, TransportSelector};

pub const DEFAULT_HOST: &str = "github.com";
pub const DEFAULT_LOGIN: &str = "repo-steward";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("{name} has invalid value {value:?}: expected one of 1, 0, true, false")]
    InvalidFlag { name: &'static str, value: String },

    #[error("could not build GitHub client: {0}")]
    Client(#[from] octocrab::Error),
}

/// Everything needed to build a [`Bot`].
#[derive(Clone)]
pub struct BotConfig {
    pub token: String,
    pub host: String,
    pub login: String,
    pub coverage: ApiCoverage,
    pub retry_config: RetryConfig,
    pub retry_policy: RetryPolicy,
}

impl BotConfig {
    pub fn new(token: impl Into<String>) -> Self {
        BotConfig {
            token: token.into(),
            host: DEFAULT_HOST.to_string(),
            login: DEFAULT_LOGIN.to_string(),
            coverage: ApiCoverage::default(),
            retry_config: RetryConfig::DEFAULT,
            retry_policy: RetryPolicy::ByReplay,
        }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("GITHUB_TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::Missing("GITHUB_TOKEN"))?;

        let mut config = BotConfig::new(token);
        if let Some(host) = lookup("GITHUB_HOST").filter(|h| !h.is_empty()) {
            config = config.with_host(host);
        }
        if let Some(login) = lookup("BOT_LOGIN").filter(|l| !l.is_empty()) {
            config = config.with_login(login);
        }
        if let Some(value) = lookup("BOT_LEGACY_MILESTONES") {
            let legacy = parse_flag("BOT_LEGACY_MILESTONES", &value)?;
            config = config.with_coverage(ApiCoverage {
                structured_milestones: !legacy,
            });
        }
        Ok(config)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = login.into();
        self
    }

    pub fn with_coverage(mut self, coverage: ApiCoverage) -> Self {
        self.coverage = coverage;
        self
    }

    pub fn with_retry(mut self, config: RetryConfig, policy: RetryPolicy) -> Self {
        self.retry_config = config;
        self.retry_policy = policy;
        self
    }

    pub fn bot_info(&self) -> BotInfo {
        BotInfo::new(&self.login, &self.host)
    }

    /// Builds the octocrab client and binds a bot to it.
    pub fn connect(&self) -> Result<Bot<OctocrabClient>, ConfigError> {
        let client = OctocrabClient::from_token(&self.token, &self.host)?
            .with_retry(self.retry_config, self.retry_policy);
        tracing::info!(
            host = %self.host,
            login = %self.login,
            structured_milestones = self.coverage.structured_milestones,
            "Connected to GitHub"
        );
        Ok(Bot::new(self.bot_info(), client)
            .with_selector(TransportSelector::new(self.coverage)))
    }
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("host", &self.host)
            .field("login", &self.login)
            .field("coverage", &self.coverage)
            .field("retry_config", &self.retry_config)
            .field("retry_policy", &self.retry_policy)
            .finish()
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "" | "0" | "false" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: value.to_string(),
        }),
    }
}
