use serde::{Deserialize, Serialize};

/// Public repository search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/search/repositories";

/// Upper bound on the total request timeout.
const MAX_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote repository search endpoint
    pub endpoint: String,
    /// Sent with every request; the remote API rejects anonymous agents
    pub user_agent: String,
    /// Total request timeout in seconds (capped at 120)
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: concat!("repo-discovery/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(endpoint) = std::env::var("REPO_DISCOVERY_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(agent) = std::env::var("REPO_DISCOVERY_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Ok(val) = std::env::var("REPO_DISCOVERY_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.timeout_secs = v.min(MAX_TIMEOUT_SECS);
            }
        }
        if let Ok(val) = std::env::var("REPO_DISCOVERY_CONNECT_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.connect_timeout_secs = v;
            }
        }

        config
    }

    /// Point at a different endpoint, keeping the other settings.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}
