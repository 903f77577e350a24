use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_FEED_URL: &str = "https://jsonplaceholder.typicode.com/posts";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default)]
    pub feed: FeedConfig,

    /// Period of the background sync in the interactive shell.
    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,

    /// Post newly added local quotes to the feed's write endpoint (best-effort).
    #[serde(default)]
    pub post_new_quotes: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            feed: FeedConfig::default(),
            sync_interval_secs: default_sync_interval_secs(),
            post_new_quotes: false,
        }
    }
}

impl AppConfig {
    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs.max(1))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Read endpoint returning `[{id, title, ...}]`.
    #[serde(default = "default_feed_url")]
    pub fetch_url: String,

    /// Write endpoint; defaults to `fetch_url` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_url: Option<String>,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            fetch_url: default_feed_url(),
            post_url: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl FeedConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            fetch_url: url.into(),
            ..Self::default()
        }
    }

    pub fn post_url(&self) -> &str {
        self.post_url.as_deref().unwrap_or(&self.fetch_url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_sync_interval_secs() -> u64 {
    30
}
